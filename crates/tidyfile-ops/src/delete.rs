//! Removing a single file.

use std::fs;
use std::path::Path;

use tidyfile_core::DeleteMode;

use crate::OperationError;

/// Delete `path` permanently or by sending it to the trash.
pub fn delete_file(path: &Path, mode: DeleteMode) -> Result<(), OperationError> {
    match mode {
        DeleteMode::Permanent => fs::remove_file(path)
            .map_err(|e| OperationError::new(path, format!("Failed to delete: {e}"))),
        DeleteMode::Trash => trash::delete(path)
            .map_err(|e| OperationError::new(path, format!("Failed to move to trash: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_delete_permanent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        delete_file(&path, DeleteMode::Permanent).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_delete_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.txt");

        let err = delete_file(&path, DeleteMode::Permanent).unwrap_err();
        assert_eq!(err.path, path);
        assert!(err.message.starts_with("Failed to delete"));
    }

    #[test]
    fn test_delete_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("dir");
        fs::create_dir(&dir).unwrap();

        assert!(delete_file(&dir, DeleteMode::Permanent).is_err());
        assert!(dir.exists());
    }
}
