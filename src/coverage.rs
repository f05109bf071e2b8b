// src/coverage.rs
//! Coverage audits: which notebooks carry front-matter, which carry the
//! Colab badge, and which are linked from the site index page.

use crate::config::Config;
use crate::discovery;
use crate::error::{LecternError, Result};
use crate::notebook;
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

static INDEX_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"notebooks/([^)]+)\.ipynb").unwrap_or_else(|_| unreachable!()));

/// Per-notebook coverage split, with a reason for every miss.
#[derive(Debug, Default)]
pub struct Coverage {
    pub covered: Vec<PathBuf>,
    pub missing: Vec<(PathBuf, String)>,
}

impl Coverage {
    #[must_use]
    pub fn total(&self) -> usize {
        self.covered.len() + self.missing.len()
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        if self.total() == 0 {
            return 100.0;
        }
        self.covered.len() as f64 / self.total() as f64 * 100.0
    }
}

/// Which notebooks have a front-matter cell in first position.
#[must_use]
pub fn front_matter(config: &Config) -> Coverage {
    classify_notebooks(config, |nb| {
        if nb.has_front_matter() {
            None
        } else {
            Some("no front-matter in first cell".to_string())
        }
    })
}

/// Which notebooks have the badge cell in canonical position. The reasons
/// mirror the shapes a notebook can be in on its way to compliant.
#[must_use]
pub fn badges(config: &Config) -> Coverage {
    classify_notebooks(config, |nb| {
        if nb.cells.len() < 2 {
            return Some("fewer than 2 cells".to_string());
        }
        if !nb.has_front_matter() {
            return Some("first cell is not raw front-matter".to_string());
        }
        let second = &nb.cells[1];
        if second.cell_type != "markdown" {
            return Some("second cell is not markdown".to_string());
        }
        if nb.has_badge() {
            None
        } else {
            Some("second cell has no Colab badge".to_string())
        }
    })
}

fn classify_notebooks(
    config: &Config,
    classify: impl Fn(&notebook::Notebook) -> Option<String> + Sync,
) -> Coverage {
    let notebooks = discovery::flat_notebooks(config);
    let results: Vec<(PathBuf, Option<String>)> = notebooks
        .par_iter()
        .map(|path| match notebook::read(path) {
            Ok(nb) => (path.clone(), classify(&nb)),
            Err(e) => (path.clone(), Some(format!("error: {e}"))),
        })
        .collect();

    let mut coverage = Coverage::default();
    for (path, reason) in results {
        match reason {
            None => coverage.covered.push(path),
            Some(reason) => coverage.missing.push((path, reason)),
        }
    }
    coverage
}

/// Disk vs. index-page audit.
#[derive(Debug, Default)]
pub struct IndexAudit {
    pub on_disk: usize,
    pub linked: usize,
    /// Notebook stems present on disk but not linked from the index.
    pub unlisted: Vec<String>,
    /// Stems linked from the index with no file behind them.
    pub dangling: Vec<String>,
}

impl IndexAudit {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.unlisted.is_empty() && self.dangling.is_empty()
    }
}

/// Compares notebooks on disk against links in the configured index page.
///
/// # Errors
/// Returns error if the index page cannot be read.
pub fn index_audit(config: &Config) -> Result<IndexAudit> {
    let index_path = config.root.join(&config.conventions.index_page);
    let content =
        fs::read_to_string(&index_path).map_err(|e| LecternError::io(e, &index_path))?;

    let linked: BTreeSet<String> = INDEX_LINK
        .captures_iter(&content)
        .map(|cap| cap[1].to_string())
        .collect();
    let existing: BTreeSet<String> = discovery::flat_notebooks(config)
        .iter()
        .filter_map(|nb| nb.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .collect();

    Ok(IndexAudit {
        on_disk: existing.len(),
        linked: linked.len(),
        unlisted: existing.difference(&linked).cloned().collect(),
        dangling: linked.difference(&existing).cloned().collect(),
    })
}
