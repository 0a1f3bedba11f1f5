//! Routing engine for tidyfile.
//!
//! This crate takes a snapshot of a source directory and routes every file
//! it contains: empty files are deleted, spam-named files are held back for
//! a single confirmation, and everything else is moved into the target.
//! Each step is published as a [`CleanEvent`] and the run ends with a
//! [`RunSummary`].
//!
//! ```rust,no_run
//! use tidyfile_core::CleanConfig;
//! use tidyfile_ops::{events, AssumeAnswer, Cleaner};
//!
//! let (tx, mut rx) = events::channel();
//! let cleaner = Cleaner::new().with_events(tx);
//! let config = CleanConfig::new("/home/me/Downloads", "/home/me/Sorted");
//!
//! let outcome = cleaner.run(&config, &mut AssumeAnswer(false)).unwrap();
//! while let Ok(event) = rx.try_recv() {
//!     println!("{event:?}");
//! }
//! if let Some(summary) = outcome.summary() {
//!     println!("{}", summary.summary());
//! }
//! ```

mod cleaner;
mod conflict;
mod delete;
pub mod events;
mod move_op;
mod operation;
pub mod progress;
mod report;
mod spam;

pub use cleaner::{Cleaner, Plan, PlannedAction};
pub use conflict::{auto_rename_path, resolve_destination, Conflict, ConflictKind};
pub use delete::delete_file;
pub use events::{CleanEvent, EventEmitter, EventReceiver, EventSender};
pub use move_op::move_into;
pub use operation::{FileOperation, OperationError};
pub use progress::{CleanProgress, ProgressReceiver, ProgressSender};
pub use report::{ActionOutcome, RunOutcome, RunSummary, SpamOutcome};
pub use spam::{AssumeAnswer, ConfirmSpamDeletion, PendingSpam, Staged};
