// tests/unit_config.rs
use lectern_core::config::Config;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[test]
fn defaults_without_config_file() -> Result<()> {
    let d = tempdir()?;
    let c = Config::load(d.path())?;
    assert_eq!(c.site.branch, "main");
    assert_eq!(c.conventions.notebooks_dir, "notebooks");
    assert_eq!(c.conventions.index_page, "notebooks.qmd");
    assert_eq!(c.backup.retention, 5);
    assert!(c.conventions.categories.contains(&"supervised".to_string()));
    Ok(())
}

#[test]
fn toml_overrides_are_applied() -> Result<()> {
    let d = tempdir()?;
    fs::write(
        d.path().join("lectern.toml"),
        concat!(
            "[site]\n",
            "github_repo = \"user/teaching\"\n",
            "branch = \"master\"\n",
            "url = \"https://user.github.io/teaching\"\n\n",
            "[conventions]\n",
            "categories = [\"intro\", \"advanced\"]\n\n",
            "[metadata]\n",
            "author = \"Ada Lovelace\"\n",
        ),
    )?;
    let c = Config::load(d.path())?;
    assert_eq!(c.site.github_repo, "user/teaching");
    assert_eq!(c.site.branch, "master");
    assert_eq!(c.conventions.categories, vec!["intro", "advanced"]);
    assert_eq!(c.metadata.author, "Ada Lovelace");
    Ok(())
}

#[test]
fn invalid_toml_is_an_error() -> Result<()> {
    let d = tempdir()?;
    fs::write(d.path().join("lectern.toml"), "[site\n")?;
    assert!(Config::load(d.path()).is_err());
    Ok(())
}

#[test]
fn ignore_file_adds_prunes() -> Result<()> {
    let d = tempdir()?;
    fs::write(d.path().join(".lecternignore"), "# comment\n\ndrafts/\nscratch\n")?;
    let c = Config::load(d.path())?;
    assert!(c.should_prune("drafts"));
    assert!(c.should_prune("scratch"));
    assert!(c.should_prune(".git"));
    assert!(!c.should_prune("supervised"));
    Ok(())
}

#[test]
fn colab_url_requires_repo_slug() -> Result<()> {
    let d = tempdir()?;
    let mut c = Config::load(d.path())?;
    assert!(c.colab_url(Path::new("notebooks/entropy.ipynb")).is_err());

    c.site.github_repo = "user/teaching".to_string();
    c.site.branch = "master".to_string();
    let url = c.colab_url(Path::new("notebooks/entropy.ipynb"))?;
    assert_eq!(
        url,
        "https://colab.research.google.com/github/user/teaching/blob/master/notebooks/entropy.ipynb"
    );
    Ok(())
}
