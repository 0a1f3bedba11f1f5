//! Core types and traits for tidyfile.
//!
//! This crate provides the data structures shared by the scanner and the
//! operations engine: snapshot entries, the spam-name classifier, run
//! configuration and the error taxonomy.

mod classify;
mod config;
mod entry;
mod error;

pub use classify::{classify, stem, Classification, MIN_SPAM_STEM_LEN, SPAM_KEYWORDS};
pub use config::{CleanConfig, CleanConfigBuilder, CollisionPolicy, DeleteMode};
pub use entry::FileEntry;
pub use error::{CleanError, ScanError, ScanWarning, WarningKind};
