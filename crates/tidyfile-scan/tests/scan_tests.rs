use std::fs;

use tempfile::TempDir;
use tidyfile_scan::{snapshot, ScanError};

fn create_tree(temp: &TempDir) {
    let root = temp.path();
    fs::create_dir_all(root.join("b/inner")).unwrap();
    fs::create_dir_all(root.join("a")).unwrap();
    fs::create_dir_all(root.join("empty_dir")).unwrap();
    fs::write(root.join("z.txt"), "z").unwrap();
    fs::write(root.join("a/one.txt"), "1").unwrap();
    fs::write(root.join("b/two.txt"), "22").unwrap();
    fs::write(root.join("b/inner/three.txt"), "").unwrap();
}

#[test]
fn test_snapshot_visits_every_file_once() {
    let temp = TempDir::new().unwrap();
    create_tree(&temp);

    let snap = snapshot(temp.path()).unwrap();
    let root = temp.path().canonicalize().unwrap();

    let paths: Vec<_> = snap.iter().map(|e| e.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            root.join("a/one.txt"),
            root.join("b/inner/three.txt"),
            root.join("b/two.txt"),
            root.join("z.txt"),
        ]
    );
    assert_eq!(snap.root, root);
    assert!(snap.warnings.is_empty());
}

#[test]
fn test_snapshot_depths() {
    let temp = TempDir::new().unwrap();
    create_tree(&temp);

    let snap = snapshot(temp.path()).unwrap();
    let depths: Vec<_> = snap.iter().map(|e| (e.name.to_string(), e.depth)).collect();
    assert!(depths.contains(&("z.txt".to_string(), 1)));
    assert!(depths.contains(&("three.txt".to_string(), 3)));
}

#[test]
fn test_snapshot_is_detached_from_later_changes() {
    let temp = TempDir::new().unwrap();
    create_tree(&temp);

    let snap = snapshot(temp.path()).unwrap();
    let before = snap.entries.clone();

    // mutate the tree after capture
    fs::create_dir(temp.path().join("sorted")).unwrap();
    fs::rename(temp.path().join("z.txt"), temp.path().join("sorted/z.txt")).unwrap();
    fs::write(temp.path().join("new.txt"), "late").unwrap();

    assert_eq!(snap.entries, before);
    assert_eq!(snap.len(), 4);
}

#[test]
fn test_snapshot_is_deterministic() {
    let temp = TempDir::new().unwrap();
    create_tree(&temp);

    let first = snapshot(temp.path()).unwrap();
    let second = snapshot(temp.path()).unwrap();
    assert_eq!(first.entries, second.entries);
}

#[test]
fn test_snapshot_empty_dir() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("nothing_here")).unwrap();

    let snap = snapshot(temp.path()).unwrap();
    assert!(snap.is_empty());
}

#[test]
fn test_snapshot_missing_root() {
    let temp = TempDir::new().unwrap();
    let err = snapshot(temp.path().join("missing")).unwrap_err();
    assert!(matches!(err, ScanError::NotFound { .. }));
}

#[cfg(unix)]
#[test]
fn test_snapshot_skips_symlinks() {
    let temp = TempDir::new().unwrap();
    create_tree(&temp);
    std::os::unix::fs::symlink(temp.path().join("z.txt"), temp.path().join("link.txt")).unwrap();
    std::os::unix::fs::symlink(temp.path().join("a"), temp.path().join("link_dir")).unwrap();

    let snap = snapshot(temp.path()).unwrap();
    assert_eq!(snap.len(), 4);
    assert!(snap.iter().all(|e| !e.name.starts_with("link")));
}

#[cfg(unix)]
#[test]
fn test_snapshot_skips_unreadable_directory() {
    use std::os::unix::fs::PermissionsExt;
    use tidyfile_scan::WarningKind;

    let temp = TempDir::new().unwrap();
    create_tree(&temp);
    let locked = temp.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("hidden_away.txt"), "x").unwrap();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read_dir(&locked).is_ok() {
        // permissions are not enforced (running as root)
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = snapshot(temp.path());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    let snap = result.unwrap();

    assert_eq!(snap.len(), 4);
    assert!(snap.iter().all(|e| e.name != "hidden_away.txt"));
    assert_eq!(snap.warnings.len(), 1);
    assert!(snap.warnings[0].path.ends_with("locked"));
    assert_eq!(snap.warnings[0].kind, WarningKind::PermissionDenied);
}
