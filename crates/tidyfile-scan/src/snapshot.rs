//! Serial, sorted snapshot of the regular files under a root.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use jwalk::{Parallelism, WalkDir};
use tracing::debug;

use tidyfile_core::{FileEntry, ScanError, ScanWarning, WarningKind};

/// Ordered list of regular files captured before a run mutates anything.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Canonical root that was walked.
    pub root: PathBuf,
    /// Regular files in traversal order.
    pub entries: Vec<FileEntry>,
    /// Entries that could not be read and were left out.
    pub warnings: Vec<ScanWarning>,
}

impl Snapshot {
    /// Number of files captured.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no files were captured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the captured files in order.
    pub fn iter(&self) -> std::slice::Iter<'_, FileEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a FileEntry;
    type IntoIter = std::slice::Iter<'a, FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Capture every regular file under `root`.
///
/// The walk is depth-first with siblings sorted by name, does not follow
/// symlinks and includes hidden files. Unreadable entries are skipped and
/// recorded as warnings; only a missing or non-directory root is an error.
pub fn snapshot(root: impl AsRef<Path>) -> Result<Snapshot, ScanError> {
    let root = root.as_ref();
    let root_path = root.canonicalize().map_err(|e| ScanError::io(root, e))?;

    if !root_path.is_dir() {
        return Err(ScanError::NotADirectory { path: root_path });
    }

    let walker = WalkDir::new(&root_path)
        .parallelism(Parallelism::Serial)
        .sort(true)
        .skip_hidden(false)
        .follow_links(false);

    let mut entries = Vec::new();
    let mut warnings = Warnings::default();

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                let warning = match err.io_error() {
                    Some(io_err) => ScanWarning::from_io(path, io_err),
                    None => ScanWarning::new(path, err.to_string(), WarningKind::ReadError),
                };
                warnings.record(warning);
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            if let Some(err) = &entry.read_children_error {
                let warning = match err.io_error() {
                    Some(io_err) => ScanWarning::from_io(entry.path(), io_err),
                    None => ScanWarning::new(entry.path(), err.to_string(), WarningKind::ReadError),
                };
                warnings.record(warning);
            }
        } else if file_type.is_file() {
            entries.push(FileEntry::new(entry.path(), entry.depth()));
        }
    }

    debug!(
        root = %root_path.display(),
        files = entries.len(),
        skipped = warnings.list.len(),
        "snapshot captured"
    );

    Ok(Snapshot {
        root: root_path,
        entries,
        warnings: warnings.list,
    })
}

/// Warnings in the order they were seen, one per path.
///
/// jwalk may surface the same unreadable directory twice.
#[derive(Default)]
struct Warnings {
    list: Vec<ScanWarning>,
    seen: HashSet<PathBuf>,
}

impl Warnings {
    fn record(&mut self, warning: ScanWarning) {
        if !self.seen.insert(warning.path.clone()) {
            return;
        }
        debug!(path = %warning.path.display(), message = %warning.message, "skipping unreadable entry");
        self.list.push(warning);
    }
}
