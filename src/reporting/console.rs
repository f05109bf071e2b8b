// src/reporting/console.rs
//! Console rendering of validator reports: a summary line plus the
//! violations grouped by kind, each with its suggested fix.

use crate::coverage::Coverage;
use crate::types::{CheckReport, Violation};
use colored::Colorize;

/// Prints a check report grouped by violation kind.
pub fn print_report(label: &str, report: &CheckReport) {
    if !report.has_findings() {
        println!(
            "{} {} ({} files scanned)",
            "[OK]".green().bold(),
            format!("{label}: no violations found").green(),
            report.files_scanned
        );
        return;
    }

    for (kind, group) in grouped(&report.violations) {
        println!("\n{}", format!("{kind} ({} issues):", group.len()).yellow().bold());
        for violation in group {
            print_violation(violation);
        }
    }

    println!(
        "\n{}",
        format!(
            "{label}: {} violations across {} files",
            report.finding_count(),
            report.files_scanned
        )
        .red()
        .bold()
    );
}

fn print_violation(violation: &Violation) {
    println!("  {} {}", "x".red(), violation.message);
    match violation.line {
        Some(line) => println!("    {} {}:{line}", "-->".blue(), violation.path.display()),
        None => println!("    {} {}", "-->".blue(), violation.path.display()),
    }
    if let Some(fix) = &violation.fix {
        println!("    {} {}", "fix:".green(), fix);
    }
}

/// Groups violations by kind, preserving first-seen order.
fn grouped(violations: &[Violation]) -> Vec<(&'static str, Vec<&Violation>)> {
    let mut groups: Vec<(&'static str, Vec<&Violation>)> = Vec::new();
    for violation in violations {
        match groups.iter_mut().find(|(kind, _)| *kind == violation.kind) {
            Some((_, group)) => group.push(violation),
            None => groups.push((violation.kind, vec![violation])),
        }
    }
    groups
}

/// Prints a coverage split: percentage first, then the misses with their
/// reasons, then the hits.
pub fn print_coverage(label: &str, coverage: &Coverage) {
    println!(
        "Coverage: {}/{} notebooks have {label} ({:.1}%)",
        coverage.covered.len(),
        coverage.total(),
        coverage.percent()
    );

    if coverage.missing.is_empty() {
        println!("{}", format!("All notebooks have {label}").green().bold());
    } else {
        println!("\nNotebooks WITHOUT {label}:");
        for (path, reason) in &coverage.missing {
            let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            println!("  {} {name}: {reason}", "x".red());
        }
    }

    if !coverage.covered.is_empty() {
        println!("\nNotebooks WITH {label}:");
        for path in &coverage.covered {
            let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            println!("  {} {name}", "+".green());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping_preserves_first_seen_order() {
        let violations = vec![
            Violation::new("a", "KIND_B", "m1".into()),
            Violation::new("b", "KIND_A", "m2".into()),
            Violation::new("c", "KIND_B", "m3".into()),
        ];
        let groups = grouped(&violations);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "KIND_B");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "KIND_A");
    }
}
