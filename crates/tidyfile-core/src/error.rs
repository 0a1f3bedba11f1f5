//! Error types for scanning and cleaning runs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while taking a snapshot.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Fatal errors that abort a run before any file is touched.
#[derive(Debug, Error)]
pub enum CleanError {
    /// The source directory does not exist.
    #[error("Source directory does not exist: {path}")]
    SourceMissing { path: PathBuf },

    /// The source exists but is not a directory.
    #[error("Source is not a directory: {path}")]
    SourceNotDirectory { path: PathBuf },

    /// The target exists but is not a directory.
    #[error("Target is not a directory: {path}")]
    TargetNotDirectory { path: PathBuf },

    /// The target directory could not be created.
    #[error("Failed to create target directory {path}: {source}")]
    TargetCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot could not be taken.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Permission was denied.
    PermissionDenied,
    /// Error reading a directory or entry.
    ReadError,
}

/// Non-fatal warning encountered during a snapshot.
///
/// Warnings never count as run failures: the entries they stand for were
/// never part of the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a warning from an I/O error, picking the kind from the error.
    pub fn from_io(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let kind = match error.kind() {
            std::io::ErrorKind::PermissionDenied => WarningKind::PermissionDenied,
            _ => WarningKind::ReadError,
        };
        Self::new(path, format!("Read error: {error}"), kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_io() {
        let err = ScanError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, ScanError::PermissionDenied { .. }));

        let err = ScanError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, ScanError::NotFound { .. }));
    }

    #[test]
    fn test_clean_error_display() {
        let err = CleanError::SourceMissing {
            path: PathBuf::from("/nope"),
        };
        assert_eq!(err.to_string(), "Source directory does not exist: /nope");

        let err: CleanError = ScanError::NotADirectory {
            path: PathBuf::from("/file"),
        }
        .into();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_warning_from_io() {
        let warning = ScanWarning::from_io(
            "/locked",
            &std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(warning.kind, WarningKind::PermissionDenied);
        assert!(warning.message.contains("denied"));
    }
}
