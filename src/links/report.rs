// src/links/report.rs
//! Markdown and JSON renderings of a link-check run, for CI artifacts.

use super::LinkSummary;
use crate::error::{LecternError, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Renders the summary as a Markdown report (suitable for a CI job
/// summary or PR comment).
#[must_use]
pub fn markdown(summary: &LinkSummary) -> String {
    let mut out = String::new();

    if !summary.has_broken() {
        let _ = writeln!(out, "## All links working\n");
        let _ = writeln!(
            out,
            "All {} links in {} files resolve correctly.",
            summary.total_links, summary.files_checked
        );
        return out;
    }

    let _ = writeln!(out, "## Link check results\n");
    let _ = writeln!(out, "- **Files checked**: {}", summary.files_checked);
    let _ = writeln!(out, "- **Total links**: {}", summary.total_links);
    let _ = writeln!(out, "- **Broken links**: {}", summary.broken.len());
    let _ = writeln!(out, "- **Success rate**: {:.1}%", summary.success_rate());

    let _ = writeln!(out, "\n### Broken links by type\n");
    for (kind, count) in summary.by_kind() {
        let _ = writeln!(out, "- **{}**: {count}", kind.label());
    }

    let _ = writeln!(out, "\n### Detailed breakdown\n");
    let mut current_file = None;
    for link in &summary.broken {
        if current_file != Some(&link.file) {
            current_file = Some(&link.file);
            let _ = writeln!(out, "\n#### `{}`\n", link.file.display());
        }
        let _ = writeln!(
            out,
            "- **Line {}**: `[{}]({})` _({})_",
            link.line,
            link.text,
            link.url,
            link.kind.label()
        );
    }

    let _ = writeln!(out, "\n### Suggested fixes\n");
    for (kind, count) in summary.by_kind() {
        let suggestions = kind.suggestions();
        if suggestions.is_empty() {
            continue;
        }
        let _ = writeln!(out, "#### {} ({count} issues)\n", kind.label());
        for suggestion in suggestions {
            let _ = writeln!(out, "- {suggestion}");
        }
        let _ = writeln!(out);
    }

    out
}

/// Writes the summary as a JSON audit file.
///
/// # Errors
/// Returns error on serialization or write failure.
pub fn write_json(summary: &LinkSummary, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)
        .map_err(|e| LecternError::Other(e.to_string()))?;
    fs::write(path, json).map_err(|e| LecternError::io(e, path))
}
