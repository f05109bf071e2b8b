// tests/integration_badge.rs
use lectern_core::config::Config;
use lectern_core::notebook::{self, badge, Cell, Notebook};
use lectern_core::types::FileOutcome;
use serde_json::Map;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn test_config(root: &Path) -> Config {
    let mut config = Config::new(root);
    config.site.github_repo = "user/teaching".to_string();
    config
}

fn write_notebook(path: &Path, cells: Vec<Cell>) -> Result<()> {
    let nb = Notebook {
        cells,
        rest: Map::new(),
    };
    notebook::write(path, &nb)?;
    Ok(())
}

fn front_matter_cell() -> Cell {
    Cell::raw("---\ntitle: 'Entropy'\n---\n".into())
}

fn notebook_with(root: &Path, cells: Vec<Cell>) -> Result<PathBuf> {
    let dir = root.join("notebooks");
    fs::create_dir_all(&dir)?;
    let path = dir.join("entropy.ipynb");
    write_notebook(&path, cells)?;
    Ok(path)
}

#[test]
fn badge_added_after_front_matter() -> Result<()> {
    let d = tempdir()?;
    let config = test_config(d.path());
    let path = notebook_with(
        d.path(),
        vec![front_matter_cell(), Cell::markdown("# Entropy\n".into())],
    )?;

    let result = badge::add_badge(&config, &path, false)?;
    assert_eq!(result.outcome, FileOutcome::Changed);

    let nb = notebook::read(&path)?;
    assert_eq!(nb.cells.len(), 3);
    assert!(nb.cells[1].is_badge());
    assert!(d.path().join("notebooks/entropy.ipynb.backup-colab").exists());
    Ok(())
}

#[test]
fn badge_skips_notebook_without_front_matter() -> Result<()> {
    let d = tempdir()?;
    let config = test_config(d.path());
    let path = notebook_with(d.path(), vec![Cell::markdown("# Entropy\n".into())])?;

    let result = badge::add_badge(&config, &path, false)?;
    assert_eq!(result.outcome, FileOutcome::Unchanged);
    assert_eq!(result.reason, "no front-matter");

    let nb = notebook::read(&path)?;
    assert_eq!(nb.cells.len(), 1);
    Ok(())
}

#[test]
fn badge_is_idempotent() -> Result<()> {
    let d = tempdir()?;
    let config = test_config(d.path());
    let path = notebook_with(
        d.path(),
        vec![front_matter_cell(), Cell::markdown("# Entropy\n".into())],
    )?;

    badge::add_badge(&config, &path, false)?;
    let second = badge::add_badge(&config, &path, false)?;
    assert_eq!(second.outcome, FileOutcome::Unchanged);
    assert_eq!(second.reason, "already has badge");

    let nb = notebook::read(&path)?;
    assert_eq!(nb.cells.len(), 3);
    Ok(())
}

#[test]
fn badge_run_snapshots_originals_for_restore() -> Result<()> {
    let d = tempdir()?;
    let config = test_config(d.path());
    let path = notebook_with(
        d.path(),
        vec![front_matter_cell(), Cell::markdown("# Entropy\n".into())],
    )?;
    let original = fs::read_to_string(&path)?;

    lectern_core::cli::handlers::handle_badge(&config, false)?;
    assert_ne!(fs::read_to_string(&path)?, original, "badge run must mutate");

    lectern_core::backup::restore_latest(d.path())?;
    assert_eq!(fs::read_to_string(&path)?, original);
    Ok(())
}

#[test]
fn badge_dry_run_reports_without_writing() -> Result<()> {
    let d = tempdir()?;
    let config = test_config(d.path());
    let path = notebook_with(d.path(), vec![front_matter_cell()])?;
    let original = fs::read_to_string(&path)?;

    let result = badge::add_badge(&config, &path, true)?;
    assert_eq!(result.outcome, FileOutcome::Changed);
    assert_eq!(fs::read_to_string(&path)?, original);
    assert!(!d.path().join("notebooks/entropy.ipynb.backup-colab").exists());
    Ok(())
}
