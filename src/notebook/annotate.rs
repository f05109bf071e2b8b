// src/notebook/annotate.rs
//! Front-matter + badge injection for notebooks that have neither.

use super::{badge, metadata, metadata::FrontMatter};
use crate::backup;
use crate::config::Config;
use crate::error::Result;
use crate::types::FileOutcome;
use std::path::{Path, PathBuf};

pub const SIBLING_SUFFIX: &str = ".backup";

#[derive(Debug, Clone, Default)]
pub struct AnnotateOptions {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub author: Option<String>,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct Annotation {
    pub outcome: FileOutcome,
    /// The front-matter that was (or would be) written.
    pub front_matter: Option<FrontMatter>,
    pub backup: Option<PathBuf>,
}

/// Adds a front-matter cell and a Colab badge cell to the top of a
/// notebook. Idempotent: a notebook whose first cell already is
/// front-matter is reported `Unchanged` and never touched, so running
/// twice cannot duplicate cells.
///
/// # Errors
/// Returns error on unreadable/malformed notebooks, missing site config,
/// or write failure.
pub fn annotate_file(config: &Config, path: &Path, opts: &AnnotateOptions) -> Result<Annotation> {
    let mut nb = super::read(path)?;

    if nb.has_front_matter() {
        return Ok(Annotation {
            outcome: FileOutcome::Unchanged,
            front_matter: None,
            backup: None,
        });
    }

    let front_matter = resolve_front_matter(config, path, opts);
    // Build the badge first so a config error surfaces before any backup.
    let badge_cell = badge::build_cell(config, path)?;

    if opts.dry_run {
        return Ok(Annotation {
            outcome: FileOutcome::Changed,
            front_matter: Some(front_matter),
            backup: None,
        });
    }

    let backup_path = backup::sibling_copy(path, SIBLING_SUFFIX)
        .map_err(|e| crate::error::LecternError::Other(e.to_string()))?;

    nb.cells.insert(0, badge_cell);
    nb.cells.insert(0, front_matter.clone().into_cell());
    super::write(path, &nb)?;

    Ok(Annotation {
        outcome: FileOutcome::Changed,
        front_matter: Some(front_matter),
        backup: Some(backup_path),
    })
}

fn resolve_front_matter(config: &Config, path: &Path, opts: &AnnotateOptions) -> FrontMatter {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (inferred_title, inferred_desc, inferred_tags) = metadata::infer_from_stem(&stem);

    FrontMatter {
        title: opts.title.clone().unwrap_or(inferred_title),
        description: opts.description.clone().unwrap_or(inferred_desc),
        tags: opts.tags.clone().unwrap_or(inferred_tags),
        author: opts
            .author
            .clone()
            .unwrap_or_else(|| config.metadata.author.clone()),
        date: metadata::today(),
    }
}
