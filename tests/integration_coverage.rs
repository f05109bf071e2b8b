// tests/integration_coverage.rs
use lectern_core::config::Config;
use lectern_core::coverage;
use lectern_core::notebook::{Cell, Notebook};
use serde_json::Map;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const BADGE_MARKDOWN: &str = "[![Open In Colab](https://colab.research.google.com/assets/colab-badge.svg)](https://colab.research.google.com/github/o/r/blob/main/notebooks/knn.ipynb)";

fn write_notebook(path: &Path, cells: Vec<Cell>) -> Result<()> {
    let nb = Notebook {
        cells,
        rest: Map::new(),
    };
    lectern_core::notebook::write(path, &nb)?;
    Ok(())
}

fn front_matter_cell() -> Cell {
    Cell::raw("---\ntitle: 'KNN'\n---\n".into())
}

#[test]
fn front_matter_coverage_splits_covered_and_missing() -> Result<()> {
    let d = tempdir()?;
    fs::create_dir_all(d.path().join("notebooks"))?;
    write_notebook(
        &d.path().join("notebooks/knn.ipynb"),
        vec![front_matter_cell(), Cell::markdown("# KNN".into())],
    )?;
    write_notebook(
        &d.path().join("notebooks/svm.ipynb"),
        vec![Cell::markdown("# SVM".into())],
    )?;

    let config = Config::new(d.path());
    let cov = coverage::front_matter(&config);

    assert_eq!(cov.covered.len(), 1);
    assert_eq!(cov.missing.len(), 1);
    assert!(cov.missing[0].0.ends_with("svm.ipynb"));
    assert!((cov.percent() - 50.0).abs() < f64::EPSILON);
    Ok(())
}

#[test]
fn badge_coverage_reports_why_each_notebook_misses() -> Result<()> {
    let d = tempdir()?;
    fs::create_dir_all(d.path().join("notebooks"))?;
    write_notebook(
        &d.path().join("notebooks/complete.ipynb"),
        vec![front_matter_cell(), Cell::markdown(BADGE_MARKDOWN.into())],
    )?;
    write_notebook(
        &d.path().join("notebooks/no-front-matter.ipynb"),
        vec![Cell::markdown("# hi".into()), Cell::markdown("text".into())],
    )?;
    write_notebook(
        &d.path().join("notebooks/no-badge.ipynb"),
        vec![front_matter_cell(), Cell::markdown("# plain heading".into())],
    )?;

    let config = Config::new(d.path());
    let cov = coverage::badges(&config);

    assert_eq!(cov.covered.len(), 1);
    assert!(cov.covered[0].ends_with("complete.ipynb"));
    let reasons: Vec<&str> = cov.missing.iter().map(|(_, r)| r.as_str()).collect();
    assert!(reasons.contains(&"first cell is not raw front-matter"));
    assert!(reasons.contains(&"second cell has no Colab badge"));
    Ok(())
}

#[test]
fn empty_notebook_dir_counts_as_full_coverage() -> Result<()> {
    let d = tempdir()?;
    fs::create_dir_all(d.path().join("notebooks"))?;
    let config = Config::new(d.path());
    let cov = coverage::front_matter(&config);
    assert_eq!(cov.total(), 0);
    assert!((cov.percent() - 100.0).abs() < f64::EPSILON);
    Ok(())
}

#[test]
fn index_audit_finds_unlisted_and_dangling() -> Result<()> {
    let d = tempdir()?;
    fs::create_dir_all(d.path().join("notebooks"))?;
    fs::write(d.path().join("notebooks/knn.ipynb"), "{\"cells\": []}")?;
    fs::write(d.path().join("notebooks/svm.ipynb"), "{\"cells\": []}")?;
    fs::write(
        d.path().join("notebooks.qmd"),
        "# Notebooks\n\n- [KNN](notebooks/knn.ipynb)\n- [Trees](notebooks/decision-trees.ipynb)\n",
    )?;

    let config = Config::new(d.path());
    let audit = coverage::index_audit(&config)?;

    assert_eq!(audit.on_disk, 2);
    assert_eq!(audit.linked, 2);
    assert_eq!(audit.unlisted, vec!["svm".to_string()]);
    assert_eq!(audit.dangling, vec!["decision-trees".to_string()]);
    assert!(!audit.is_clean());
    Ok(())
}

#[test]
fn index_audit_requires_the_index_page() {
    let d = tempdir().unwrap();
    fs::create_dir_all(d.path().join("notebooks")).unwrap();
    assert!(coverage::index_audit(&Config::new(d.path())).is_err());
}
