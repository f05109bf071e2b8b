// src/types.rs
use serde::Serialize;
use std::path::PathBuf;

/// A single finding from one of the validators.
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Stable machine-readable kind, e.g. `UPPERCASE_LETTERS`.
    pub kind: &'static str,
    pub message: String,
    /// Suggested remediation. For `layout` this is a shell command;
    /// it is never applied automatically.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
}

impl Violation {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, kind: &'static str, message: String) -> Self {
        Self {
            path: path.into(),
            line: None,
            kind,
            message,
            fix: None,
        }
    }

    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }
}

/// Aggregated results from a validator run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub files_scanned: usize,
    pub violations: Vec<Violation>,
    pub duration_ms: u128,
}

impl CheckReport {
    #[must_use]
    pub fn has_findings(&self) -> bool {
        !self.violations.is_empty()
    }

    #[must_use]
    pub fn finding_count(&self) -> usize {
        self.violations.len()
    }
}

/// Outcome of processing one file with a mutating command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// File was rewritten (or would be, under dry-run).
    Changed,
    /// File already satisfied the target form.
    Unchanged,
    /// File could not be processed; the run continues.
    Skipped,
}

/// Tally for a batch run of a mutating command.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchSummary {
    pub changed: usize,
    pub unchanged: usize,
    pub skipped: usize,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Changed => self.changed += 1,
            FileOutcome::Unchanged => self.unchanged += 1,
            FileOutcome::Skipped => self.skipped += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.changed + self.unchanged + self.skipped
    }
}

/// Result of an external command execution (used by `compile`).
#[derive(Debug, Clone, Serialize)]
pub struct CommandResult {
    pub command: String,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

impl CommandResult {
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
