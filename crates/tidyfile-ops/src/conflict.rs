//! Destination collision detection and resolution for moves.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use tidyfile_core::CollisionPolicy;

use crate::OperationError;

/// Highest suffix tried by [`auto_rename_path`].
const MAX_RENAME_ATTEMPTS: usize = 999;

/// A conflict detected while preparing a move.
#[derive(Debug, Clone)]
pub struct Conflict {
    /// The source path being moved.
    pub source: PathBuf,
    /// The destination path where the conflict exists.
    pub destination: PathBuf,
    /// The kind of conflict.
    pub kind: ConflictKind,
}

impl Conflict {
    /// Create a new conflict.
    pub fn new(source: PathBuf, destination: PathBuf, kind: ConflictKind) -> Self {
        Self {
            source,
            destination,
            kind,
        }
    }
}

impl From<Conflict> for OperationError {
    fn from(conflict: Conflict) -> Self {
        let mut err = OperationError::new(
            conflict.source,
            format!("{}: {}", conflict.kind, conflict.destination.display()),
        );
        err.conflict = Some(conflict.kind);
        err
    }
}

/// The kind of conflict encountered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictKind {
    /// A file already exists at the destination.
    FileExists,
    /// A directory already exists at the destination.
    DirectoryExists,
    /// Source and destination are the same file.
    SameFile,
    /// No free "name (n)" variant was left.
    NoFreeName,
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileExists => write!(f, "File already exists"),
            Self::DirectoryExists => write!(f, "Directory already exists"),
            Self::SameFile => write!(f, "File is already in the target"),
            Self::NoFreeName => write!(f, "No free name left"),
        }
    }
}

/// Pick the final destination for moving `source` to `destination`.
///
/// A directory in the way and a move onto itself fail under every policy.
pub fn resolve_destination(
    source: &Path,
    destination: PathBuf,
    policy: CollisionPolicy,
) -> Result<PathBuf, OperationError> {
    if destination == source {
        return Err(Conflict::new(source.to_path_buf(), destination, ConflictKind::SameFile).into());
    }

    let metadata = match fs::symlink_metadata(&destination) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(destination),
        Err(e) => {
            return Err(OperationError::new(
                source,
                format!("Failed to inspect {}: {}", destination.display(), e),
            ));
        }
    };

    if metadata.is_dir() {
        return Err(
            Conflict::new(source.to_path_buf(), destination, ConflictKind::DirectoryExists).into(),
        );
    }

    match policy {
        CollisionPolicy::Fail => {
            Err(Conflict::new(source.to_path_buf(), destination, ConflictKind::FileExists).into())
        }
        CollisionPolicy::Overwrite => Ok(destination),
        CollisionPolicy::AutoRename => auto_rename_path(&destination).ok_or_else(|| {
            Conflict::new(source.to_path_buf(), destination, ConflictKind::NoFreeName).into()
        }),
    }
}

/// Generate an auto-renamed path to avoid conflicts.
///
/// For "file.txt", tries "file (1).txt", "file (2).txt", etc. and returns
/// the first one that does not exist. Names that are not valid UTF-8 keep
/// their original bytes.
pub fn auto_rename_path(path: &Path) -> Option<PathBuf> {
    let parent = path.parent().unwrap_or(Path::new(""));
    let stem = path.file_stem().unwrap_or_default();
    let extension = path.extension();

    (1..=MAX_RENAME_ATTEMPTS)
        .map(|i| {
            let mut name = OsString::from(stem);
            name.push(format!(" ({i})"));
            if let Some(ext) = extension {
                name.push(".");
                name.push(ext);
            }
            parent.join(name)
        })
        .find(|candidate| fs::symlink_metadata(candidate).is_err())
}
