// src/layout.rs
//! Repository layout validation.
//!
//! The expected shape: every category directory at the root carries
//! `slides/` and `assets/` subdirectories, assets are organized per topic
//! under `figures/`, `diagrams/`, or `notes/`, and all notebooks live in
//! one flat top-level directory. Violations come with shell-command
//! remediation suggestions; nothing is ever applied automatically.

use crate::config::Config;
use crate::error::Result;
use crate::types::{CheckReport, Violation};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Runs every layout check.
///
/// # Errors
/// Currently infallible, kept fallible for parity with the other checkers.
pub fn check_all(config: &Config) -> Result<CheckReport> {
    let start = Instant::now();
    let mut violations = Vec::new();

    for category in &config.conventions.categories {
        check_category(config, category, &mut violations);
        check_nested_slides(config, category, &mut violations);
        check_asset_organization(config, category, &mut violations);
    }
    check_notebooks_dir(config, &mut violations);

    Ok(CheckReport {
        files_scanned: config.conventions.categories.len() + 1,
        violations,
        duration_ms: start.elapsed().as_millis(),
    })
}

fn check_category(config: &Config, category: &str, out: &mut Vec<Violation>) {
    let category_path = config.root.join(category);
    if !category_path.exists() {
        out.push(
            Violation::new(
                &category_path,
                "MISSING_CATEGORY",
                format!("missing main category directory: {category}/"),
            )
            .with_fix(format!("mkdir -p {category}/{{slides,assets}}")),
        );
        return;
    }

    for required in ["slides", "assets"] {
        let dir = category_path.join(required);
        if !dir.exists() {
            out.push(
                Violation::new(
                    &dir,
                    "MISSING_SUBDIR",
                    format!("missing required subdirectory: {category}/{required}/"),
                )
                .with_fix(format!("mkdir -p {category}/{required}")),
            );
        }
    }

    // Notebooks are flat at the top level; a per-category notebooks/
    // directory is always wrong.
    let nested = category_path.join("notebooks");
    if nested.exists() {
        let notebooks_dir = &config.conventions.notebooks_dir;
        if dir_contains_ipynb(&nested) {
            out.push(
                Violation::new(
                    &nested,
                    "NESTED_NOTEBOOKS",
                    format!(
                        "notebooks should be in /{notebooks_dir}/, not {category}/notebooks/"
                    ),
                )
                .with_fix(format!(
                    "mv {category}/notebooks/*.ipynb {notebooks_dir}/ && rm -rf {category}/notebooks"
                )),
            );
        } else {
            out.push(
                Violation::new(
                    &nested,
                    "UNNECESSARY_DIR",
                    format!("empty notebooks/ directory should be removed: {category}/notebooks/"),
                )
                .with_fix(format!("rm -rf {category}/notebooks")),
            );
        }
    }
}

fn check_nested_slides(config: &Config, category: &str, out: &mut Vec<Violation>) {
    let slides_path = config.root.join(category).join("slides");
    for entry in read_dirs(&slides_path) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name == "__pycache__" {
            continue;
        }
        if dir_contains_tex(&entry.path()) {
            out.push(
                Violation::new(
                    entry.path(),
                    "NESTED_SLIDES",
                    format!(
                        "slides should be directly in {category}/slides/, not nested: {name}/"
                    ),
                )
                .with_fix(format!(
                    "mv {category}/slides/{name}/*.tex {category}/slides/ && rm -rf {category}/slides/{name}/"
                )),
            );
        }
    }
}

fn check_asset_organization(config: &Config, category: &str, out: &mut Vec<Violation>) {
    const EXPECTED: [&str; 3] = ["figures", "diagrams", "notes"];

    let assets_path = config.root.join(category).join("assets");
    for topic in read_dirs(&assets_path) {
        let topic_path = topic.path();
        let has_expected = EXPECTED.iter().any(|sub| topic_path.join(sub).exists());
        if has_expected {
            continue;
        }
        let has_direct_files = fs::read_dir(&topic_path)
            .map(|entries| {
                entries
                    .filter_map(std::result::Result::ok)
                    .any(|e| e.path().is_file())
            })
            .unwrap_or(false);
        if has_direct_files {
            let name = topic.file_name().to_string_lossy().into_owned();
            out.push(
                Violation::new(
                    &topic_path,
                    "ASSET_ORGANIZATION",
                    format!(
                        "assets should be in {name}/{{figures,diagrams,notes}}/, not directly in {name}/"
                    ),
                )
                .with_fix(format!(
                    "mkdir -p {path}/figures && mv {path}/*.{{pdf,png,jpg,svg}} {path}/figures/ 2>/dev/null || true",
                    path = topic_path.display()
                )),
            );
        }
    }
}

fn check_notebooks_dir(config: &Config, out: &mut Vec<Violation>) {
    let notebooks_path = config.notebooks_dir();
    if !notebooks_path.exists() {
        out.push(
            Violation::new(
                &notebooks_path,
                "MISSING_NOTEBOOKS",
                format!(
                    "missing main {}/ directory",
                    config.conventions.notebooks_dir
                ),
            )
            .with_fix(format!("mkdir {}", config.conventions.notebooks_dir)),
        );
    }
}

/// Renders the remediation commands as a copy-pasteable shell script.
#[must_use]
pub fn fix_script(violations: &[Violation]) -> String {
    let mut out = String::from("#!/bin/bash\n# Auto-generated layout fixes\n");
    for violation in violations {
        let Some(fix) = &violation.fix else { continue };
        let _ = writeln!(out, "# Fix: {}", violation.message);
        let _ = writeln!(out, "{fix}\n");
    }
    out
}

fn read_dirs(path: &Path) -> Vec<fs::DirEntry> {
    let mut dirs: Vec<fs::DirEntry> = fs::read_dir(path)
        .into_iter()
        .flatten()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.path().is_dir())
        .collect();
    dirs.sort_by_key(fs::DirEntry::file_name);
    dirs
}

fn dir_contains_ipynb(dir: &Path) -> bool {
    dir_contains_ext(dir, "ipynb")
}

fn dir_contains_tex(dir: &Path) -> bool {
    dir_contains_ext(dir, "tex")
}

fn dir_contains_ext(dir: &Path, ext: &str) -> bool {
    fs::read_dir(dir)
        .map(|entries| {
            entries.filter_map(std::result::Result::ok).any(|e| {
                e.path()
                    .extension()
                    .is_some_and(|x| x.eq_ignore_ascii_case(ext))
            })
        })
        .unwrap_or(false)
}
