//! Snapshot traversal for tidyfile.
//!
//! A snapshot is the complete, ordered list of regular files under a root,
//! captured in one pass before anything is modified. Later changes to the
//! tree (files moved into a target inside the source, a freshly created
//! target directory) never feed back into the list that drives a run.
//!
//! # Example
//!
//! ```rust,no_run
//! let snapshot = tidyfile_scan::snapshot("/path/to/scan").unwrap();
//!
//! for entry in snapshot.iter() {
//!     println!("{} ({})", entry.path.display(), entry.classify());
//! }
//! println!("{} files, {} skipped", snapshot.len(), snapshot.warnings.len());
//! ```

mod snapshot;

pub use snapshot::{snapshot, Snapshot};

// Re-export core types for convenience
pub use tidyfile_core::{FileEntry, ScanError, ScanWarning, WarningKind};
