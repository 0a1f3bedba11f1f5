//! Per-file decisions and errors.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::Display;

use tidyfile_core::classify;

use crate::conflict::ConflictKind;

/// What the router does with a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FileOperation {
    /// Empty file, removed immediately.
    Delete,
    /// Regular file, moved into the target.
    Move,
    /// Spam-named file, held back for confirmation.
    DeferSpam,
}

impl FileOperation {
    /// Decide the operation for a file of `size` bytes named `name`.
    ///
    /// Emptiness wins over the name: a zero-byte file with a random name
    /// is deleted, not deferred.
    pub fn decide(size: u64, name: &str) -> Self {
        if size == 0 {
            Self::Delete
        } else if classify(name).is_spam() {
            Self::DeferSpam
        } else {
            Self::Move
        }
    }
}

/// An error that occurred while handling a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationError {
    /// The path that caused the error.
    pub path: PathBuf,
    /// A human-readable error message.
    pub message: String,
    /// Set when the error comes from a destination collision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict: Option<ConflictKind>,
}

impl OperationError {
    /// Create a new operation error.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            conflict: None,
        }
    }

    /// Check if the file was skipped because it already sits in the target.
    pub fn is_already_in_target(&self) -> bool {
        self.conflict == Some(ConflictKind::SameFile)
    }
}

impl std::fmt::Display for OperationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}
