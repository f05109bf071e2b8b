// src/notebook/assets.rs
//! Verifies that image files referenced from notebook cells exist.
//!
//! Catches the usual reference shapes: markdown images, IPython
//! `Image(filename=...)`, and the `imread` family.

use crate::error::Result;
use crate::types::Violation;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

const IMG_EXT: &str = r"(?:png|jpg|jpeg|gif|svg)";

static MARKDOWN_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"!\[[^\]]*\]\(([^)]+\.{IMG_EXT})\)")).unwrap_or_else(|_| unreachable!())
});
static IPYTHON_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r#"Image\(filename=['"]([^'"]+\.{IMG_EXT})['"]"#))
        .unwrap_or_else(|_| unreachable!())
});
static IMREAD: LazyLock<Regex> = LazyLock::new(|| {
    // Matches bare imread(...) plus the cv2./io. prefixed forms.
    Regex::new(&format!(r#"imread\(['"]([^'"]+\.{IMG_EXT})['"]"#))
        .unwrap_or_else(|_| unreachable!())
});

/// Image names that are generated at runtime and never committed.
const GENERATED: &[&str] = &["demo.gif", "mnist.gif", "algo.gif", "dog.jpg"];

/// Extracts every checkable image reference from one cell source.
#[must_use]
pub fn image_refs(source: &str) -> Vec<String> {
    let mut refs = Vec::new();
    for re in [&*MARKDOWN_IMAGE, &*IPYTHON_IMAGE, &*IMREAD] {
        for cap in re.captures_iter(source) {
            let path = cap[1].to_string();
            if path.starts_with("http") {
                continue;
            }
            if GENERATED.iter().any(|g| path.ends_with(g)) {
                continue;
            }
            if !refs.contains(&path) {
                refs.push(path);
            }
        }
    }
    refs
}

/// Checks every image reference in a notebook against the filesystem,
/// resolving relative to the notebook's directory.
///
/// # Errors
/// Returns error if the notebook cannot be read or parsed.
pub fn check_notebook(path: &Path) -> Result<Vec<Violation>> {
    let nb = super::read(path)?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut violations = Vec::new();
    for (index, cell) in nb.cells.iter().enumerate() {
        for image in image_refs(&cell.source.joined()) {
            let resolved = dir.join(&image);
            if !resolved.exists() {
                violations.push(
                    Violation::new(
                        path,
                        "MISSING_IMAGE",
                        format!("cell {index} references missing image: {image}"),
                    )
                    .with_fix(format!("expected at {}", resolved.display())),
                );
            }
        }
    }
    Ok(violations)
}
