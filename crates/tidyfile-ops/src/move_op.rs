//! Moving a single file into the target directory.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tidyfile_core::CollisionPolicy;

use crate::conflict::resolve_destination;
use crate::OperationError;

/// Move `source` into `target_dir` under its basename.
///
/// Returns the final destination, which differs from the basename only
/// under [`CollisionPolicy::AutoRename`]. On error the source is left where
/// it was.
pub fn move_into(
    source: &Path,
    target_dir: &Path,
    policy: CollisionPolicy,
) -> Result<PathBuf, OperationError> {
    let Some(file_name) = source.file_name() else {
        return Err(OperationError::new(source, "Path has no file name"));
    };

    let destination = resolve_destination(source, target_dir.join(file_name), policy)?;
    move_file(source, &destination).map_err(|e| OperationError::new(source, e))?;
    Ok(destination)
}

/// Move a single file, falling back to copy + delete across filesystems.
fn move_file(source: &Path, dest: &Path) -> Result<(), String> {
    match fs::rename(source, dest) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => copy_then_replace(source, dest),
        Err(e) => Err(format!("Failed to move: {e}")),
    }
}

/// Copy `source` next to `dest`, remove `source`, then rename the copy
/// into place.
///
/// An existing `dest` is only replaced once the source is gone, so a
/// failed removal leaves both files as they were.
fn copy_then_replace(source: &Path, dest: &Path) -> Result<(), String> {
    let staging = staging_path(dest);

    fs::copy(source, &staging).map_err(|e| {
        let _ = fs::remove_file(&staging);
        format!("Failed to copy: {e}")
    })?;

    if let Err(e) = fs::remove_file(source) {
        let _ = fs::remove_file(&staging);
        return Err(format!("Failed to remove source: {e}"));
    }

    fs::rename(&staging, dest)
        .map_err(|e| format!("Failed to rename {} into place: {e}", staging.display()))
}

/// Hidden sibling of `dest` used while a cross-device copy is in flight.
fn staging_path(dest: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(dest.file_name().unwrap_or_default());
    name.push(".tidyfile-part");
    dest.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_move_into() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("notes.txt");
        let target = temp.path().join("out");
        fs::create_dir(&target).unwrap();
        fs::write(&source, "hello").unwrap();

        let dest = move_into(&source, &target, CollisionPolicy::Fail).unwrap();
        assert_eq!(dest, target.join("notes.txt"));
        assert!(!source.exists());
        assert_eq!(fs::read_to_string(dest).unwrap(), "hello");
    }

    #[test]
    fn test_move_into_keeps_source_on_conflict() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("notes.txt");
        let target = temp.path().join("out");
        fs::create_dir(&target).unwrap();
        fs::write(&source, "new").unwrap();
        fs::write(target.join("notes.txt"), "old").unwrap();

        let err = move_into(&source, &target, CollisionPolicy::Fail).unwrap_err();
        assert_eq!(err.path, source);
        assert_eq!(fs::read_to_string(&source).unwrap(), "new");
        assert_eq!(fs::read_to_string(target.join("notes.txt")).unwrap(), "old");
    }

    #[test]
    fn test_move_into_overwrite() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("notes.txt");
        let target = temp.path().join("out");
        fs::create_dir(&target).unwrap();
        fs::write(&source, "new").unwrap();
        fs::write(target.join("notes.txt"), "old").unwrap();

        move_into(&source, &target, CollisionPolicy::Overwrite).unwrap();
        assert!(!source.exists());
        assert_eq!(fs::read_to_string(target.join("notes.txt")).unwrap(), "new");
    }

    #[test]
    fn test_move_missing_source() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("out");
        fs::create_dir(&target).unwrap();

        let err = move_into(&temp.path().join("gone.txt"), &target, CollisionPolicy::Fail)
            .unwrap_err();
        assert!(err.message.starts_with("Failed to move"));
    }

    #[test]
    fn test_copy_then_replace() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("notes.txt");
        let dest = temp.path().join("out.txt");
        fs::write(&source, "new").unwrap();
        fs::write(&dest, "old").unwrap();

        copy_then_replace(&source, &dest).unwrap();
        assert!(!source.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
        assert!(!staging_path(&dest).exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_then_replace_keeps_destination_when_source_stays() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let locked = temp.path().join("locked");
        let target = temp.path().join("out");
        fs::create_dir(&locked).unwrap();
        fs::create_dir(&target).unwrap();
        let source = locked.join("notes.txt");
        let dest = target.join("notes.txt");
        fs::write(&source, "new").unwrap();
        fs::write(&dest, "old").unwrap();

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();
        if fs::write(locked.join("write-check"), "").is_ok() {
            // permissions are not enforced (running as root)
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let err = copy_then_replace(&source, &dest).unwrap_err();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(err.starts_with("Failed to remove source"));
        assert_eq!(fs::read_to_string(&source).unwrap(), "new");
        assert_eq!(fs::read_to_string(&dest).unwrap(), "old");
        assert!(!staging_path(&dest).exists());
    }
}
