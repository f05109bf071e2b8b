// src/latex/includes.rs
//! Checks that every `\includepdf{...}` target exists on disk.

use crate::config::Config;
use crate::discovery;
use crate::error::Result;
use crate::types::Violation;
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static INCLUDEPDF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\includepdf(?:\[[^\]]*\])?\s*\{([^}]+)\}").unwrap_or_else(|_| unreachable!())
});

/// Extracts checkable `\includepdf` targets from one source. Targets
/// containing a backslash are LaTeX macros (`\thetree.pdf`) and cannot be
/// resolved statically.
#[must_use]
pub fn pdf_refs(content: &str) -> Vec<String> {
    INCLUDEPDF
        .captures_iter(content)
        .map(|cap| cap[1].trim().to_string())
        .filter(|target| !target.contains('\\'))
        .collect()
}

/// Checks `\includepdf` references in every `.tex` file, resolving
/// relative to the referencing file.
///
/// # Errors
/// Currently infallible, kept fallible for parity with the other checkers.
pub fn check_all(config: &Config) -> Result<Vec<Violation>> {
    let files = discovery::tex_files(config);
    let violations: Vec<Violation> = files
        .par_iter()
        .flat_map(|tex| check_file(tex))
        .collect();
    Ok(violations)
}

fn check_file(tex: &Path) -> Vec<Violation> {
    let Ok(content) = fs::read_to_string(tex) else {
        return vec![Violation::new(
            tex,
            "UNREADABLE",
            "could not read LaTeX source".to_string(),
        )];
    };
    let dir = tex.parent().unwrap_or_else(|| Path::new("."));
    pdf_refs(&content)
        .into_iter()
        .filter(|target| !dir.join(target).exists())
        .map(|target| {
            Violation::new(
                tex,
                "MISSING_PDF",
                format!("\\includepdf references missing file: {target}"),
            )
            .with_fix(format!("expected at {}", dir.join(&target).display()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_targets_and_skips_macros() {
        let src = r"\includepdf[pages=-]{notes/cnn.pdf} \includepdf{\thetree.pdf}";
        assert_eq!(pdf_refs(src), vec!["notes/cnn.pdf"]);
    }
}
