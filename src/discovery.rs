// src/discovery.rs
//! Filesystem walks shared by every subcommand.

use crate::config::Config;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// All notebooks under `root`, recursively.
#[must_use]
pub fn notebooks(config: &Config) -> Vec<PathBuf> {
    walk_with_extension(config, &config.root, "ipynb")
}

/// Notebooks in the flat notebooks directory only (non-recursive),
/// which is where the conventions expect them to live.
#[must_use]
pub fn flat_notebooks(config: &Config) -> Vec<PathBuf> {
    let dir = config.notebooks_dir();
    let mut found: Vec<PathBuf> = std::fs::read_dir(&dir)
        .into_iter()
        .flatten()
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file() && has_extension(p, "ipynb"))
        .collect();
    found.sort();
    found
}

/// All `.tex` sources, recursively.
#[must_use]
pub fn tex_files(config: &Config) -> Vec<PathBuf> {
    walk_with_extension(config, &config.root, "tex")
}

/// `.tex` files that live inside a `slides/` directory.
#[must_use]
pub fn slide_files(config: &Config) -> Vec<PathBuf> {
    tex_files(config)
        .into_iter()
        .filter(|p| {
            p.components()
                .any(|c| c.as_os_str().to_string_lossy() == "slides")
        })
        .collect()
}

/// All Quarto pages, recursively.
#[must_use]
pub fn qmd_files(config: &Config) -> Vec<PathBuf> {
    walk_with_extension(config, &config.root, "qmd")
}

fn walk_with_extension(config: &Config, root: &Path, ext: &str) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            !(e.file_type().is_dir() && config.should_prune(&e.file_name().to_string_lossy()))
        });

    let mut paths = Vec::new();
    let mut errors = 0_usize;
    for item in walker {
        match item {
            Ok(entry) => {
                if entry.file_type().is_file() && has_extension(entry.path(), ext) {
                    paths.push(entry.path().to_path_buf());
                }
            }
            Err(_) => errors += 1,
        }
    }
    if errors > 0 && config.verbose {
        eprintln!("WARN: encountered {errors} errors during file walk");
    }
    paths
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
        // Sibling backups like `foo.ipynb.backup` must never be picked up;
        // they fail the extension test above, but be explicit about the
        // double-suffix case on case-insensitive filesystems.
        && !path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().contains(".backup"))
}

/// Path relative to the repo root, for display and URL building.
#[must_use]
pub fn rel_to_root<'a>(path: &'a Path, root: &Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_siblings_are_not_notebooks() {
        assert!(has_extension(Path::new("a/entropy.ipynb"), "ipynb"));
        assert!(!has_extension(Path::new("a/entropy.ipynb.backup"), "ipynb"));
        assert!(!has_extension(Path::new("a/entropy.ipynb.backup-colab"), "ipynb"));
    }

    #[test]
    fn slide_filter_requires_slides_component() {
        let p = Path::new("supervised/slides/svm.tex");
        assert!(p
            .components()
            .any(|c| c.as_os_str().to_string_lossy() == "slides"));
        let q = Path::new("supervised/assets/svm.tex");
        assert!(!q
            .components()
            .any(|c| c.as_os_str().to_string_lossy() == "slides"));
    }
}
