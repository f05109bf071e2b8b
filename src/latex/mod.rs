// src/latex/mod.rs
//! Regex-based LaTeX source transforms and reference checks.

pub mod includes;
pub mod quotes;
pub mod structure;

use crate::error::{LecternError, Result};
use std::fs;
use std::path::Path;

/// Applies a pure text transform to a file on disk. Returns the new
/// content when it differs from the original, `None` when the file is
/// already in the target form. The caller decides about backups and
/// whether to actually write.
///
/// # Errors
/// Returns error if the file cannot be read.
pub fn transformed(path: &Path, transform: impl Fn(&str) -> String) -> Result<Option<String>> {
    let original = fs::read_to_string(path).map_err(|e| LecternError::io(e, path))?;
    let fixed = transform(&original);
    if fixed == original {
        Ok(None)
    } else {
        Ok(Some(fixed))
    }
}
