// src/naming.rs
//! Naming-convention validation: `lowercase-with-hyphens` for notebooks
//! and slide sources, plus `notebookbox` URL references in slides.

use crate::config::Config;
use crate::discovery;
use crate::error::Result;
use crate::types::{CheckReport, Violation};
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Instant;

static NOTEBOOK_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*\.ipynb$").unwrap_or_else(|_| unreachable!()));
static SLIDE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9]*(-[a-z0-9]+)*\.tex$").unwrap_or_else(|_| unreachable!()));
static NOTEBOOKBOX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\\begin\{notebookbox\}\{([^}]+)\}").unwrap_or_else(|_| unreachable!()));
static NON_KEBAB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9-]").unwrap_or_else(|_| unreachable!()));
static HYPHEN_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").unwrap_or_else(|_| unreachable!()));

#[must_use]
pub fn is_valid_notebook_name(filename: &str) -> bool {
    NOTEBOOK_NAME.is_match(filename)
}

#[must_use]
pub fn is_valid_slide_name(filename: &str) -> bool {
    SLIDE_NAME.is_match(filename)
}

/// Kebab-cases a stem: lowercase, hyphens for spaces/underscores, stripped
/// of anything else.
#[must_use]
pub fn suggest_stem(stem: &str) -> String {
    let lowered = stem.to_lowercase().replace([' ', '_'], "-");
    let cleaned = NON_KEBAB.replace_all(&lowered, "");
    let collapsed = HYPHEN_RUN.replace_all(&cleaned, "-");
    collapsed.trim_matches('-').to_string()
}

/// Classifies why a filename fails the convention; precedence follows the
/// most actionable problem first.
fn classify(filename: &str) -> (&'static str, String) {
    if filename.contains(' ') {
        (
            "SPACES_IN_NAME",
            format!("name contains spaces: {filename}"),
        )
    } else if filename != filename.to_lowercase() {
        (
            "UPPERCASE_LETTERS",
            format!("name contains uppercase letters: {filename}"),
        )
    } else if filename.contains('_') {
        (
            "UNDERSCORES_USED",
            format!("name uses underscores instead of hyphens: {filename}"),
        )
    } else {
        (
            "INVALID_FORMAT",
            format!("name does not follow lowercase-with-hyphens: {filename}"),
        )
    }
}

fn name_violation(path: &Path, filename: &str, ext: &str) -> Violation {
    let (kind, message) = classify(filename);
    let stem = filename.strip_suffix(ext).unwrap_or(filename);
    Violation::new(path, kind, message)
        .with_fix(format!("rename to: {}{ext}", suggest_stem(stem)))
}

/// Validates notebook names, slide names, and `notebookbox` references.
/// Per-file work runs in parallel; result order follows the sorted
/// discovery order.
///
/// # Errors
/// Currently infallible, kept fallible for parity with the other checkers.
pub fn check_all(config: &Config) -> Result<CheckReport> {
    let start = Instant::now();
    let notebooks = discovery::flat_notebooks(config);
    let slides = discovery::slide_files(config);
    let tex_files = discovery::tex_files(config);

    let mut violations: Vec<Violation> = notebooks
        .par_iter()
        .filter_map(|nb| {
            let filename = nb.file_name()?.to_string_lossy();
            (!is_valid_notebook_name(&filename)).then(|| name_violation(nb, &filename, ".ipynb"))
        })
        .collect();

    violations.extend(
        slides
            .par_iter()
            .filter_map(|slide| {
                let filename = slide.file_name()?.to_string_lossy();
                (!is_valid_slide_name(&filename)).then(|| name_violation(slide, &filename, ".tex"))
            })
            .collect::<Vec<_>>(),
    );

    let available: BTreeSet<String> = notebooks
        .iter()
        .filter_map(|nb| nb.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .collect();
    violations.extend(
        tex_files
            .par_iter()
            .flat_map(|tex| check_notebookbox_refs(config, tex, &available))
            .collect::<Vec<_>>(),
    );

    Ok(CheckReport {
        files_scanned: notebooks.len() + tex_files.len(),
        violations,
        duration_ms: start.elapsed().as_millis(),
    })
}

/// Validates `\begin{notebookbox}{url}` references in one slide source:
/// the URL must point into the published notebooks area, end in `.html`,
/// and name a notebook that exists under the naming convention.
fn check_notebookbox_refs(
    config: &Config,
    tex: &Path,
    available: &BTreeSet<String>,
) -> Vec<Violation> {
    let Ok(content) = fs::read_to_string(tex) else {
        eprintln!("WARN: could not read {}", tex.display());
        return Vec::new();
    };

    let site_prefix = if config.site.url.is_empty() {
        None
    } else {
        Some(format!("{}/notebooks/", config.site.url.trim_end_matches('/')))
    };

    let mut violations = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        for cap in NOTEBOOKBOX.captures_iter(line) {
            let url = &cap[1];
            let line = line_no + 1;

            if let Some(prefix) = &site_prefix {
                if !url.starts_with(prefix.as_str()) {
                    violations.push(
                        Violation::new(tex, "INVALID_NOTEBOOK_URL", format!(
                            "notebookbox URL does not follow the expected pattern: {url}"
                        ))
                        .at_line(line)
                        .with_fix(format!("use {prefix}NOTEBOOK-NAME.html")),
                    );
                    continue;
                }
            }

            let Some(name) = url
                .rsplit('/')
                .next()
                .and_then(|last| last.strip_suffix(".html"))
            else {
                violations.push(
                    Violation::new(tex, "INVALID_NOTEBOOK_URL", format!(
                        "notebookbox URL should end with .html: {url}"
                    ))
                    .at_line(line),
                );
                continue;
            };

            if !available.contains(name) {
                violations.push(
                    Violation::new(tex, "MISSING_NOTEBOOK", format!(
                        "notebookbox references non-existent notebook: {name}.ipynb"
                    ))
                    .at_line(line)
                    .with_fix(format!(
                        "create {}/{name}.ipynb or fix the reference",
                        config.conventions.notebooks_dir
                    )),
                );
            }
            if !is_valid_notebook_name(&format!("{name}.ipynb")) {
                violations.push(
                    Violation::new(tex, "INCONSISTENT_NAMING", format!(
                        "notebookbox references notebook with non-standard name: {name}"
                    ))
                    .at_line(line)
                    .with_fix(format!("rename notebook to: {}.ipynb and update the URL", suggest_stem(name))),
                );
            }
        }
    }
    violations
}
