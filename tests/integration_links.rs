// tests/integration_links.rs
use lectern_core::config::Config;
use lectern_core::links::{self, report, LinkKind};
use std::fs;
use tempfile::tempdir;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[test]
fn broken_and_working_links_are_separated() -> Result<()> {
    let d = tempdir()?;
    fs::create_dir_all(d.path().join("notebooks"))?;
    fs::create_dir_all(d.path().join("supervised/slides"))?;
    fs::write(d.path().join("notebooks/entropy.ipynb"), "{}")?;
    fs::write(d.path().join("supervised/slides/svm.pdf"), "pdf")?;
    fs::write(
        d.path().join("index.qmd"),
        concat!(
            "[entropy](notebooks/entropy.ipynb)\n",
            "[svm slides](supervised/slides/svm.pdf)\n",
            "[missing](notebooks/missing.ipynb)\n",
            "[missing pdf](supervised/slides/trees.pdf)\n",
            "[external](https://example.com/x.pdf)\n",
            "[anchor](#section)\n",
        ),
    )?;

    let config = Config::load(d.path())?;
    let summary = links::check_all(&config)?;

    assert_eq!(summary.files_checked, 1);
    assert_eq!(summary.total_links, 6);
    assert_eq!(summary.broken.len(), 2);

    let kinds = summary.by_kind();
    assert_eq!(kinds.get(&LinkKind::MissingNotebook), Some(&1));
    assert_eq!(kinds.get(&LinkKind::MissingPdf), Some(&1));
    Ok(())
}

#[test]
fn links_resolve_relative_to_the_page() -> Result<()> {
    let d = tempdir()?;
    fs::create_dir_all(d.path().join("supervised"))?;
    fs::write(d.path().join("supervised/notes.pdf"), "pdf")?;
    fs::write(
        d.path().join("supervised/topic.qmd"),
        "[notes](notes.pdf)\n[root](/supervised/notes.pdf)\n[bad](/notes.pdf)\n",
    )?;

    let config = Config::load(d.path())?;
    let summary = links::check_all(&config)?;

    assert_eq!(summary.total_links, 3);
    assert_eq!(summary.broken.len(), 1);
    assert_eq!(summary.broken[0].url, "/notes.pdf");
    Ok(())
}

#[test]
fn anchor_suffixes_are_stripped_before_checking() -> Result<()> {
    let d = tempdir()?;
    fs::write(d.path().join("chapter.pdf"), "")?;
    fs::write(
        d.path().join("index.qmd"),
        "[with anchor](chapter.pdf#page=2)\n",
    )?;
    let config = Config::load(d.path())?;
    let summary = links::check_all(&config)?;
    assert!(summary.broken.is_empty());
    Ok(())
}

#[test]
fn json_audit_report_is_written() -> Result<()> {
    let d = tempdir()?;
    fs::write(d.path().join("index.qmd"), "[gone](missing.pdf)\n")?;
    let config = Config::load(d.path())?;
    let summary = links::check_all(&config)?;

    let audit = d.path().join("link-audit.json");
    report::write_json(&summary, &audit)?;

    let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(audit)?)?;
    assert_eq!(parsed["total_links"], 1);
    assert_eq!(parsed["broken"][0]["kind"], "missing-pdf");
    assert_eq!(parsed["broken"][0]["line"], 1);
    Ok(())
}
