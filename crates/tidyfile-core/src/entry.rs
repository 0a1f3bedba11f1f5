//! Snapshot entries.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::classify::{classify, Classification};

/// A regular file captured by a snapshot.
///
/// Entries are immutable once captured. The byte size is deliberately not
/// stored: it is read at decision time with [`FileEntry::read_size`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Basename (lossy UTF-8).
    pub name: CompactString,
    /// Depth below the snapshot root (direct children are depth 1).
    pub depth: usize,
}

impl FileEntry {
    /// Create a new entry for `path` at `depth`.
    pub fn new(path: impl Into<PathBuf>, depth: usize) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| CompactString::new(n.to_string_lossy()))
            .unwrap_or_default();
        Self { path, name, depth }
    }

    /// Get the path of this entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current byte size of the file.
    ///
    /// Symlinks are not followed.
    pub fn read_size(&self) -> io::Result<u64> {
        fs::symlink_metadata(&self.path).map(|m| m.len())
    }

    /// Classify this entry's basename.
    pub fn classify(&self) -> Classification {
        classify(&self.name)
    }
}
