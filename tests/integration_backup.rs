// tests/integration_backup.rs
use lectern_core::backup;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[test]
fn sibling_copy_appends_suffix() -> Result<()> {
    let d = tempdir()?;
    let file = d.path().join("entropy.ipynb");
    fs::write(&file, "{\"cells\": []}")?;

    let dest = backup::sibling_copy(&file, ".backup")?;
    assert_eq!(dest, d.path().join("entropy.ipynb.backup"));
    assert_eq!(fs::read(&file)?, fs::read(&dest)?);
    Ok(())
}

#[test]
fn snapshot_mirrors_tree_and_writes_manifest() -> Result<()> {
    let d = tempdir()?;
    fs::create_dir_all(d.path().join("notebooks"))?;
    fs::write(d.path().join("notebooks/knn.ipynb"), "{}")?;
    fs::create_dir_all(d.path().join("maths/slides"))?;
    fs::write(d.path().join("maths/slides/entropy.tex"), "\\begin{document}")?;

    let rel_paths = vec![
        PathBuf::from("notebooks/knn.ipynb"),
        PathBuf::from("maths/slides/entropy.tex"),
    ];
    let folder = backup::create_snapshot(d.path(), &rel_paths)?.expect("snapshot created");

    assert!(folder.join("notebooks/knn.ipynb").exists());
    assert!(folder.join("maths/slides/entropy.tex").exists());

    let manifest: Vec<backup::ManifestEntry> =
        serde_json::from_str(&fs::read_to_string(folder.join(backup::MANIFEST_FILE))?)?;
    assert_eq!(manifest.len(), 2);
    assert!(manifest.iter().any(|e| e.path == "notebooks/knn.ipynb"));
    assert!(manifest.iter().all(|e| e.sha256.len() == 64));
    Ok(())
}

#[test]
fn snapshot_of_nothing_returns_none() -> Result<()> {
    let d = tempdir()?;
    let folder = backup::create_snapshot(d.path(), &[PathBuf::from("missing.ipynb")])?;
    assert!(folder.is_none());
    assert!(!d.path().join(backup::BACKUP_DIR).exists());
    Ok(())
}

#[test]
fn restore_brings_back_latest_snapshot() -> Result<()> {
    let d = tempdir()?;
    // Two snapshots laid down by hand so the timestamps are distinct.
    for (ts, content) in [("100", "old"), ("200", "new")] {
        let snap = d.path().join(backup::BACKUP_DIR).join(ts).join("notebooks");
        fs::create_dir_all(&snap)?;
        fs::write(snap.join("knn.ipynb"), content)?;
        fs::write(snap.parent().unwrap().join(backup::MANIFEST_FILE), "[]")?;
    }
    fs::create_dir_all(d.path().join("notebooks"))?;
    fs::write(d.path().join("notebooks/knn.ipynb"), "mangled")?;

    let restored = backup::restore_latest(d.path())?;
    assert_eq!(restored, vec![PathBuf::from("notebooks/knn.ipynb")]);
    assert_eq!(fs::read_to_string(d.path().join("notebooks/knn.ipynb"))?, "new");
    Ok(())
}

#[test]
fn restore_orders_snapshots_numerically() -> Result<()> {
    let d = tempdir()?;
    // "9" sorts after "100" lexicographically; only numeric order picks "new".
    for (ts, content) in [("9", "old"), ("100", "new")] {
        let snap = d.path().join(backup::BACKUP_DIR).join(ts).join("notebooks");
        fs::create_dir_all(&snap)?;
        fs::write(snap.join("knn.ipynb"), content)?;
        fs::write(snap.parent().unwrap().join(backup::MANIFEST_FILE), "[]")?;
    }
    // A stray non-snapshot directory must not shadow the real snapshots.
    fs::create_dir_all(d.path().join(backup::BACKUP_DIR).join("notes"))?;

    backup::restore_latest(d.path())?;
    assert_eq!(fs::read_to_string(d.path().join("notebooks/knn.ipynb"))?, "new");
    Ok(())
}

#[test]
fn restore_without_backups_is_an_error() {
    let d = tempdir().unwrap();
    assert!(backup::restore_latest(d.path()).is_err());
}

#[test]
fn cleanup_keeps_only_newest_snapshots() -> Result<()> {
    let d = tempdir()?;
    for ts in ["100", "200", "300", "400"] {
        fs::create_dir_all(d.path().join(backup::BACKUP_DIR).join(ts))?;
    }

    backup::cleanup_old(d.path(), 2);

    let backup_root = d.path().join(backup::BACKUP_DIR);
    assert!(!backup_root.join("100").exists());
    assert!(!backup_root.join("200").exists());
    assert!(backup_root.join("300").exists());
    assert!(backup_root.join("400").exists());
    Ok(())
}
