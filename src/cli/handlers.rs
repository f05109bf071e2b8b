// src/cli/handlers.rs
use crate::cli::args::LinkFormat;
use crate::compile;
use crate::config::Config;
use crate::coverage;
use crate::discovery;
use crate::exit::LecternExit;
use crate::latex::{self, quotes, structure};
use crate::links::{self, report as link_report, LinkSummary};
use crate::naming;
use crate::notebook::annotate::{annotate_file, AnnotateOptions};
use crate::notebook::{self, assets, badge};
use crate::reporting;
use crate::types::{BatchSummary, CheckReport, FileOutcome};
use crate::{backup, layout};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

/// Handles `annotate`: one notebook, or every notebook under a directory
/// with `--batch`. Batch runs snapshot the notebooks about to change so
/// `restore` can undo them; per-file failures are reported and skipped.
///
/// # Errors
/// Returns error for a single-file run that fails, unusable arguments,
/// or a failed snapshot.
pub fn handle_annotate(
    config: &Config,
    path: &Path,
    opts: &AnnotateOptions,
    batch: bool,
) -> Result<LecternExit> {
    if path.is_file() {
        let annotation = annotate_file(config, path, opts)
            .with_context(|| format!("Failed to annotate {}", path.display()))?;
        print_annotation(path, &annotation, opts.dry_run);
        return Ok(LecternExit::Success);
    }

    if !path.is_dir() || !batch {
        bail!("path must be a notebook file, or use --batch for directories");
    }

    let notebooks = collect_notebooks(config, path);
    if notebooks.is_empty() {
        println!("No notebooks found in {}", path.display());
        return Ok(LecternExit::Success);
    }

    println!("Found {} notebooks to process:", notebooks.len());
    if !opts.dry_run {
        snapshot_pending(config, &notebooks, |nb| !nb.has_front_matter())?;
    }

    let mut summary = BatchSummary::default();
    for nb in &notebooks {
        match annotate_file(config, nb, opts) {
            Ok(annotation) => {
                print_annotation(nb, &annotation, opts.dry_run);
                summary.record(annotation.outcome);
            }
            Err(e) => {
                eprintln!("  {} error processing {}: {e}", "x".red(), nb.display());
                summary.record(FileOutcome::Skipped);
            }
        }
        println!();
    }
    if !opts.dry_run {
        backup::cleanup_old(&config.root, config.backup.retention);
    }
    println!("Summary: {} notebooks modified", summary.changed);
    Ok(LecternExit::Success)
}

/// Snapshots the notebooks a batch run is about to change, so `restore`
/// can undo the whole run. Taken before any file is written.
fn snapshot_pending(
    config: &Config,
    notebooks: &[PathBuf],
    will_change: impl Fn(&notebook::Notebook) -> bool,
) -> Result<()> {
    let pending: Vec<PathBuf> = notebooks
        .iter()
        .filter(|nb| notebook::read(nb).is_ok_and(|parsed| will_change(&parsed)))
        .map(|nb| discovery::rel_to_root(nb, &config.root).to_path_buf())
        .collect();
    backup::create_snapshot(&config.root, &pending)?;
    Ok(())
}

fn print_annotation(
    path: &Path,
    annotation: &crate::notebook::annotate::Annotation,
    dry_run: bool,
) {
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    match annotation.outcome {
        FileOutcome::Unchanged => {
            println!("{} {name} already has front-matter", "+".green());
        }
        FileOutcome::Changed => {
            println!("Adding metadata to {name}:");
            if let Some(fm) = &annotation.front_matter {
                println!("  Title: {}", fm.title);
                println!("  Description: {}", fm.description);
                println!("  Tags: {}", fm.tags.join(", "));
            }
            if dry_run {
                println!("  [DRY RUN - no changes made]");
            } else {
                if let Some(backup) = &annotation.backup {
                    println!(
                        "  Backup created: {}",
                        backup.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
                    );
                }
                println!("  {} Added front-matter and Colab badge", "+".green());
            }
        }
        FileOutcome::Skipped => {}
    }
}

fn collect_notebooks(config: &Config, dir: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            !(e.file_type().is_dir() && config.should_prune(&e.file_name().to_string_lossy()))
        })
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|p| {
            p.extension().is_some_and(|x| x == "ipynb")
                && !p.file_name().is_some_and(|n| n.to_string_lossy().contains(".backup"))
        })
        .collect();
    found.sort();
    found
}

/// Handles `badge`: adds the Colab badge to every flat notebook that has
/// front-matter but no badge. The notebooks about to change are
/// snapshotted first so `restore` can undo the run.
///
/// # Errors
/// Returns error if snapshot creation fails; per-file errors are
/// reported and skipped.
pub fn handle_badge(config: &Config, dry_run: bool) -> Result<LecternExit> {
    let notebooks = discovery::flat_notebooks(config);
    println!("Found {} notebooks to check:", notebooks.len());
    if !dry_run {
        snapshot_pending(config, &notebooks, |nb| {
            nb.has_front_matter() && !nb.has_badge()
        })?;
    }

    let mut summary = BatchSummary::default();
    for nb in &notebooks {
        let name = nb.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        match badge::add_badge(config, nb, dry_run) {
            Ok(result) => {
                summary.record(result.outcome);
                if result.outcome == FileOutcome::Changed {
                    println!("Adding Colab badge to {name}");
                    if dry_run {
                        println!("  [DRY RUN - no changes made]");
                    } else if let Some(backup) = &result.backup {
                        println!(
                            "  Backup created: {}",
                            backup.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
                        );
                    }
                } else if result.reason != "already has badge" {
                    println!("Skipped {name}: {}", result.reason);
                }
            }
            Err(e) => {
                eprintln!("  {} error processing {name}: {e}", "x".red());
                summary.record(FileOutcome::Skipped);
            }
        }
    }

    if !dry_run {
        backup::cleanup_old(&config.root, config.backup.retention);
    }
    let prefix = if dry_run { "would be " } else { "" };
    println!("\nSummary: {} notebooks {prefix}modified", summary.changed);
    Ok(LecternExit::Success)
}

/// Handles `coverage` with its three views.
///
/// # Errors
/// Returns error if the index page is unreadable for `--index`.
pub fn handle_coverage(config: &Config, badges: bool, index: bool) -> Result<LecternExit> {
    if index {
        let audit = coverage::index_audit(config)?;
        print_index_audit(config, &audit);
    } else if badges {
        reporting::print_coverage("Colab badges", &coverage::badges(config));
    } else {
        reporting::print_coverage("front-matter", &coverage::front_matter(config));
    }
    Ok(LecternExit::Success)
}

fn print_index_audit(config: &Config, audit: &coverage::IndexAudit) {
    println!("NOTEBOOK COVERAGE AUDIT");
    println!("{}", "=".repeat(50));
    println!("Total notebooks on disk: {}", audit.on_disk);
    println!(
        "Total notebooks linked in {}: {}",
        config.conventions.index_page, audit.linked
    );

    if !audit.unlisted.is_empty() {
        println!("\nMISSING FROM INDEX ({} notebooks):", audit.unlisted.len());
        for stem in &audit.unlisted {
            println!("  - {stem}.ipynb");
        }
    }
    if !audit.dangling.is_empty() {
        println!("\nBROKEN LINKS ({} links):", audit.dangling.len());
        for stem in &audit.dangling {
            println!("  - {stem}.ipynb (linked but doesn't exist)");
        }
    }
    if audit.is_clean() {
        println!("\n{}", "All notebooks are linked and organized".green().bold());
    }
}

/// Handles `links`.
///
/// # Errors
/// Returns error if the JSON audit file cannot be written.
pub fn handle_links(
    config: &Config,
    format: LinkFormat,
    report_path: Option<&Path>,
) -> Result<LecternExit> {
    let summary = links::check_all(config)?;

    match format {
        LinkFormat::Terminal => print_link_summary(&summary),
        LinkFormat::Markdown => print!("{}", link_report::markdown(&summary)),
    }
    if let Some(path) = report_path {
        link_report::write_json(&summary, path)?;
        println!("Audit report written to {}", path.display());
    }

    Ok(LecternExit::from_findings(summary.broken.len()))
}

fn print_link_summary(summary: &LinkSummary) {
    println!("{}", "LINK CHECK REPORT".bold());
    println!("{}", "=".repeat(60));
    println!("Files checked: {}", summary.files_checked);
    println!("Total links: {}", summary.total_links);
    println!("Broken links: {}", summary.broken.len());

    if !summary.has_broken() {
        println!("{}", "All links are working".green().bold());
        return;
    }
    println!("Success rate: {:.1}%", summary.success_rate());

    println!("\n{}", "BROKEN LINKS BY TYPE:".yellow().bold());
    for (kind, count) in summary.by_kind() {
        println!("  {}: {count}", kind.label());
    }

    println!("\n{}", "DETAILED BREAKDOWN:".yellow().bold());
    let mut current_file = None;
    for link in &summary.broken {
        if current_file != Some(&link.file) {
            current_file = Some(&link.file);
            println!("\n{}", link.file.display().to_string().bold());
        }
        println!("  Line {:3}: [{}]({})", link.line, link.text, link.url);
        println!("            Type: {}", link.kind.label());
    }

    println!("\n{}", "SUGGESTED FIXES:".yellow().bold());
    for (kind, count) in summary.by_kind() {
        let suggestions = kind.suggestions();
        if suggestions.is_empty() {
            continue;
        }
        println!("\n{} ({count} issues):", kind.label().to_uppercase());
        for suggestion in suggestions {
            println!("  - {suggestion}");
        }
    }
}

/// Handles `naming`.
///
/// # Errors
/// Propagates checker errors.
pub fn handle_naming(config: &Config) -> Result<LecternExit> {
    let report = naming::check_all(config)?;
    reporting::print_report("naming", &report);
    Ok(LecternExit::from_findings(report.finding_count()))
}

/// Handles `layout`, appending the remediation script when violations
/// were found.
///
/// # Errors
/// Propagates checker errors.
pub fn handle_layout(config: &Config) -> Result<LecternExit> {
    let report = layout::check_all(config)?;
    reporting::print_report("layout", &report);
    if report.has_findings() {
        println!("\nQuick fix script:\n{}", layout::fix_script(&report.violations));
    }
    Ok(LecternExit::from_findings(report.finding_count()))
}

/// Handles `assets`: notebook image references plus `\includepdf` targets.
///
/// # Errors
/// Propagates checker errors; unreadable notebooks are skipped with a
/// warning.
pub fn handle_assets(config: &Config) -> Result<LecternExit> {
    let start = Instant::now();
    let notebooks = discovery::flat_notebooks(config);

    let outcomes: Vec<_> = notebooks
        .par_iter()
        .map(|nb| (nb, assets::check_notebook(nb)))
        .collect();
    let mut violations = Vec::new();
    for (nb, outcome) in outcomes {
        match outcome {
            Ok(mut found) => violations.append(&mut found),
            Err(e) => eprintln!("WARN: skipping {}: {e}", nb.display()),
        }
    }
    violations.extend(crate::latex::includes::check_all(config)?);

    let report = CheckReport {
        files_scanned: notebooks.len(),
        violations,
        duration_ms: start.elapsed().as_millis(),
    };
    reporting::print_report("assets", &report);
    Ok(LecternExit::from_findings(report.finding_count()))
}

/// Handles `quotes`.
///
/// # Errors
/// Returns error if snapshot creation or a write fails.
pub fn handle_quotes(config: &Config, dry_run: bool) -> Result<LecternExit> {
    let files = discovery::tex_files(config);
    apply_transform(config, &files, dry_run, "Fixed quotes in", quotes::fix_quotes)?;
    Ok(LecternExit::Success)
}

/// Handles `tidy`: the structural slide pass plus a residue listing.
///
/// # Errors
/// Returns error if snapshot creation or a write fails.
pub fn handle_tidy(config: &Config, dry_run: bool) -> Result<LecternExit> {
    let files = discovery::slide_files(config);
    println!("Found {} slide files to process", files.len());
    apply_transform(config, &files, dry_run, "Fixed", structure::fix_slides)?;

    let (backups, auxiliaries) = structure::residue(config);
    if !backups.is_empty() || !auxiliaries.is_empty() {
        println!("\nFiles that could be removed (not removing automatically):");
        println!("  Backup files ({}):", backups.len());
        for path in backups.iter().take(10) {
            println!("    {}", path.display());
        }
        if backups.len() > 10 {
            println!("    ... and {} more", backups.len() - 10);
        }
        println!("  LaTeX auxiliary files ({}): regenerated during compilation", auxiliaries.len());
    }
    Ok(LecternExit::Success)
}

fn apply_transform(
    config: &Config,
    files: &[PathBuf],
    dry_run: bool,
    verb: &str,
    transform: impl Fn(&str) -> String,
) -> Result<()> {
    let mut changes: Vec<(PathBuf, String)> = Vec::new();
    for path in files {
        match latex::transformed(path, &transform) {
            Ok(Some(content)) => changes.push((path.clone(), content)),
            Ok(None) => {}
            Err(e) => eprintln!("WARN: skipping {}: {e}", path.display()),
        }
    }

    if changes.is_empty() {
        println!("No changes needed across {} files", files.len());
        return Ok(());
    }
    if dry_run {
        for (path, _) in &changes {
            println!("[DRY RUN] would fix: {}", path.display());
        }
        println!("\n{} files would change", changes.len());
        return Ok(());
    }

    let rels: Vec<PathBuf> = changes
        .iter()
        .map(|(path, _)| discovery::rel_to_root(path, &config.root).to_path_buf())
        .collect();
    backup::create_snapshot(&config.root, &rels)?;

    for (path, content) in &changes {
        fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{verb}: {}", path.display());
    }
    backup::cleanup_old(&config.root, config.backup.retention);
    println!("\nSummary: {} of {} files changed", changes.len(), files.len());
    Ok(())
}

/// Handles `compile`: runs pdflatex over every slide, continuing through
/// failures.
///
/// # Errors
/// Currently infallible; spawn failures are reported per file.
pub fn handle_compile(config: &Config) -> Result<LecternExit> {
    let slides = discovery::slide_files(config);
    println!("Found {} slide files to compile", slides.len());

    let mut failed = 0_usize;
    for tex in &slides {
        match compile::compile_file(tex) {
            Ok(result) if result.success() => {
                println!("{} {} ({} ms)", "ok".green(), tex.display(), result.duration_ms);
            }
            Ok(result) => {
                failed += 1;
                println!("{} {} (exit {})", "FAIL".red().bold(), tex.display(), result.exit_code);
                let mut tail: Vec<&str> = result.stdout.lines().rev().take(5).collect();
                tail.reverse();
                if !tail.is_empty() {
                    println!("{}", tail.join("\n").dimmed());
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("{} {}: {e}", "FAIL".red().bold(), tex.display());
            }
        }
    }

    println!(
        "\nCompiled {} of {} slide files",
        slides.len() - failed,
        slides.len()
    );
    Ok(LecternExit::from_findings(failed))
}

/// Handles `restore`.
///
/// # Errors
/// Returns error when no snapshot exists or a copy fails.
pub fn handle_restore(config: &Config) -> Result<LecternExit> {
    let restored = backup::restore_latest(&config.root)?;
    println!("Restored {} files from the latest snapshot:", restored.len());
    for path in &restored {
        println!("  {}", path.display());
    }
    Ok(LecternExit::Success)
}
