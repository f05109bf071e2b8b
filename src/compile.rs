// src/compile.rs
//! Batch compilation of slide sources with `pdflatex`.

use crate::types::CommandResult;
use anyhow::{anyhow, Context, Result};
use std::path::Path;
use std::process::Command;
use std::time::Instant;

/// Compiles one `.tex` file in its own directory so relative asset paths
/// resolve the way the slides expect.
///
/// # Errors
/// Returns error if `pdflatex` cannot be spawned (e.g. not installed).
#[allow(clippy::cast_possible_truncation)]
pub fn compile_file(tex: &Path) -> Result<CommandResult> {
    let dir = tex.parent().unwrap_or_else(|| Path::new("."));
    let filename = tex
        .file_name()
        .ok_or_else(|| anyhow!("no file name in {}", tex.display()))?;

    let start = Instant::now();
    let output = Command::new("pdflatex")
        .arg("-interaction=nonstopmode")
        .arg(filename)
        .current_dir(dir)
        .output()
        .with_context(|| format!("Failed to spawn pdflatex for {}", tex.display()))?;

    Ok(CommandResult {
        command: format!("pdflatex -interaction=nonstopmode {}", filename.to_string_lossy()),
        exit_code: output.status.code().unwrap_or(1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        duration_ms: start.elapsed().as_millis() as u64,
    })
}
