// src/backup.rs
//! Snapshot backups for mutating commands.
//!
//! Two layers, matching how the repository has historically been kept safe:
//! sibling copies (`foo.ipynb.backup`) written right next to the file being
//! touched, and timestamped snapshots under `.lectern_backup/<ts>/` that
//! mirror relative paths and carry a SHA-256 manifest, so a batch run can
//! be undone with `lectern restore`.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const BACKUP_DIR: &str = ".lectern_backup";
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub path: String,
    pub sha256: String,
}

/// Copies `path` to a sibling with the given suffix appended,
/// e.g. `entropy.ipynb` -> `entropy.ipynb.backup`.
///
/// # Errors
/// Returns error if the copy fails.
pub fn sibling_copy(path: &Path, suffix: &str) -> Result<PathBuf> {
    let mut name = path
        .file_name()
        .ok_or_else(|| anyhow!("no file name in {}", path.display()))?
        .to_os_string();
    name.push(suffix);
    let dest = path.with_file_name(name);
    fs::copy(path, &dest)
        .with_context(|| format!("Failed to back up {}", path.display()))?;
    Ok(dest)
}

/// Creates a timestamped snapshot of the given repo-relative paths.
/// Returns `None` when nothing exists to back up.
///
/// # Errors
/// Returns error if directory creation or file copying fails.
pub fn create_snapshot(root: &Path, rel_paths: &[PathBuf]) -> Result<Option<PathBuf>> {
    let targets: Vec<&PathBuf> = rel_paths
        .iter()
        .filter(|p| root.join(p).exists())
        .collect();
    if targets.is_empty() {
        return Ok(None);
    }

    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let folder = root.join(BACKUP_DIR).join(timestamp.to_string());
    fs::create_dir_all(&folder).context("Failed to create backup directory")?;

    let mut manifest = Vec::with_capacity(targets.len());
    for rel in targets {
        let src = root.join(rel);
        let dest = folder.join(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = fs::read(&src)
            .with_context(|| format!("Failed to read {}", src.display()))?;
        fs::write(&dest, &bytes)
            .with_context(|| format!("Failed to write {}", dest.display()))?;
        manifest.push(ManifestEntry {
            path: rel.to_string_lossy().replace('\\', "/"),
            sha256: hex_digest(&bytes),
        });
    }

    let manifest_json = serde_json::to_string_pretty(&manifest)?;
    fs::write(folder.join(MANIFEST_FILE), manifest_json)?;
    Ok(Some(folder))
}

/// Restores the newest snapshot into `root`. Returns the restored paths.
///
/// # Errors
/// Returns error if no snapshot exists or a copy fails.
pub fn restore_latest(root: &Path) -> Result<Vec<PathBuf>> {
    let backup_root = root.join(BACKUP_DIR);
    if !backup_root.exists() {
        return Err(anyhow!("No backup directory found at {}", backup_root.display()));
    }

    // Directory names are unix timestamps; compare numerically so that
    // e.g. "100" outranks "9". Non-numeric entries are not snapshots.
    let latest = fs::read_dir(&backup_root)?
        .filter_map(std::result::Result::ok)
        .filter(|e| e.path().is_dir())
        .filter_map(|e| {
            let ts: u64 = e.file_name().to_string_lossy().parse().ok()?;
            Some((ts, e.path()))
        })
        .max_by_key(|(ts, _)| *ts)
        .map(|(_, path)| path)
        .ok_or_else(|| anyhow!("No snapshots found in {}", backup_root.display()))?;

    let mut restored = Vec::new();
    for entry in walkdir::WalkDir::new(&latest) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry.path().strip_prefix(&latest)?;
        if rel == Path::new(MANIFEST_FILE) {
            continue;
        }
        let dest = root.join(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &dest)?;
        restored.push(rel.to_path_buf());
    }
    Ok(restored)
}

/// Deletes snapshots beyond the newest `retention`.
pub fn cleanup_old(root: &Path, retention: usize) {
    let backup_root = root.join(BACKUP_DIR);
    let Ok(entries) = fs::read_dir(&backup_root) else {
        return;
    };

    let mut timestamps: Vec<(u64, PathBuf)> = entries
        .filter_map(std::result::Result::ok)
        .filter_map(|e| {
            let path = e.path();
            let ts: u64 = path.file_name()?.to_string_lossy().parse().ok()?;
            Some((ts, path))
        })
        .collect();
    timestamps.sort_by(|a, b| b.0.cmp(&a.0));

    for (_, path) in timestamps.into_iter().skip(retention) {
        let _ = fs::remove_dir_all(path);
    }
}

fn hex_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
