// src/notebook/badge.rs
//! "Open In Colab" badge cell construction and insertion.

use super::Cell;
use crate::backup;
use crate::config::Config;
use crate::discovery;
use crate::error::Result;
use crate::types::FileOutcome;
use std::path::{Path, PathBuf};

pub const BADGE_IMAGE: &str = "https://colab.research.google.com/assets/colab-badge.svg";
pub const BADGE_SIBLING_SUFFIX: &str = ".backup-colab";

/// Builds the markdown badge cell for a notebook path.
///
/// # Errors
/// Returns error when `site.github_repo` is unconfigured.
pub fn build_cell(config: &Config, notebook_path: &Path) -> Result<Cell> {
    let rel = discovery::rel_to_root(notebook_path, &config.root);
    let url = config.colab_url(rel)?;
    Ok(Cell::markdown(format!(
        "[![Open In Colab]({BADGE_IMAGE})]({url})\n"
    )))
}

/// Outcome of a badge insertion attempt, with the reason when skipped.
#[derive(Debug)]
pub struct BadgeResult {
    pub outcome: FileOutcome,
    pub reason: &'static str,
    pub backup: Option<PathBuf>,
}

/// Inserts the badge cell right after the front-matter cell, backing the
/// notebook up to a `.backup-colab` sibling first. Notebooks without
/// front-matter are left alone: the badge position is defined relative to
/// it, and `annotate` adds both together.
///
/// # Errors
/// Returns error on unreadable/malformed notebooks or write failure.
pub fn add_badge(config: &Config, path: &Path, dry_run: bool) -> Result<BadgeResult> {
    let mut nb = super::read(path)?;

    if !nb.has_front_matter() {
        return Ok(BadgeResult {
            outcome: FileOutcome::Unchanged,
            reason: "no front-matter",
            backup: None,
        });
    }
    if nb.has_badge() {
        return Ok(BadgeResult {
            outcome: FileOutcome::Unchanged,
            reason: "already has badge",
            backup: None,
        });
    }

    let cell = build_cell(config, path)?;
    if dry_run {
        return Ok(BadgeResult {
            outcome: FileOutcome::Changed,
            reason: "would add badge",
            backup: None,
        });
    }

    let backup_path = backup::sibling_copy(path, BADGE_SIBLING_SUFFIX)
        .map_err(|e| crate::error::LecternError::Other(e.to_string()))?;
    nb.cells.insert(1, cell);
    super::write(path, &nb)?;
    Ok(BadgeResult {
        outcome: FileOutcome::Changed,
        reason: "added badge",
        backup: Some(backup_path),
    })
}
