//! Per-file outcomes and the run summary.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::events::CleanEvent;
use crate::OperationError;

/// Outcome of the main pass for a single file.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The file was empty and has been deleted.
    Deleted { path: PathBuf },
    /// The file has been moved into the target.
    Moved {
        from: PathBuf,
        to: PathBuf,
        bytes: u64,
    },
    /// The file looks like spam and waits for the spam stage.
    DeferredSpam { path: PathBuf },
    /// Handling the file failed; it was left as it was.
    Failed(OperationError),
}

impl ActionOutcome {
    /// The event announcing this outcome, if it has one.
    ///
    /// Deferred files are announced together by the spam stage.
    pub fn to_event(&self) -> Option<CleanEvent> {
        match self {
            Self::Deleted { path } => Some(CleanEvent::Deleted { path: path.clone() }),
            Self::Moved { from, to, bytes } => Some(CleanEvent::Moved {
                from: from.clone(),
                to: to.clone(),
                bytes: *bytes,
            }),
            Self::DeferredSpam { .. } => None,
            Self::Failed(err) => Some(CleanEvent::Failed {
                path: err.path.clone(),
                message: err.message.clone(),
            }),
        }
    }
}

/// Terminal outcome of a deferred spam file.
#[derive(Debug, Clone, PartialEq)]
pub enum SpamOutcome {
    /// Confirmed and deleted.
    Deleted,
    /// Left untouched (declined or deletion disabled).
    Skipped,
    /// Confirmed, but the deletion failed.
    Failed(OperationError),
}

/// Counters and failures of one run.
///
/// At the end of a run `removed + moved + spam_skipped + failed() == total`.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Snapshot size, fixed when the run starts.
    pub total: usize,
    /// Empty files plus confirmed spam files deleted.
    pub removed: usize,
    /// Files moved into the target.
    pub moved: usize,
    /// Files classified as spam during the main pass.
    pub spam_detected: usize,
    /// Spam files deleted after confirmation.
    pub spam_deleted: usize,
    /// Spam files left in place.
    pub spam_skipped: usize,
    /// Bytes moved into the target.
    pub bytes_moved: u64,
    /// Per-file failures in the order they happened.
    pub failures: Vec<OperationError>,
    /// Wall-clock start of the run.
    pub started_at: DateTime<Utc>,
    /// Time from start to completion.
    pub duration: Duration,
}

impl RunSummary {
    /// Create an empty summary for a snapshot of `total` files.
    pub fn new(total: usize, started_at: DateTime<Utc>) -> Self {
        Self {
            total,
            removed: 0,
            moved: 0,
            spam_detected: 0,
            spam_deleted: 0,
            spam_skipped: 0,
            bytes_moved: 0,
            failures: Vec::new(),
            started_at,
            duration: Duration::ZERO,
        }
    }

    /// Count a main-pass outcome.
    pub fn record(&mut self, outcome: &ActionOutcome) {
        match outcome {
            ActionOutcome::Deleted { .. } => self.removed += 1,
            ActionOutcome::Moved { bytes, .. } => {
                self.moved += 1;
                self.bytes_moved += bytes;
            }
            ActionOutcome::DeferredSpam { .. } => self.spam_detected += 1,
            ActionOutcome::Failed(err) => self.failures.push(err.clone()),
        }
    }

    /// Count the terminal outcome of a deferred spam file.
    pub fn record_spam(&mut self, outcome: &SpamOutcome) {
        match outcome {
            SpamOutcome::Deleted => {
                self.removed += 1;
                self.spam_deleted += 1;
            }
            SpamOutcome::Skipped => self.spam_skipped += 1,
            SpamOutcome::Failed(err) => self.failures.push(err.clone()),
        }
    }

    /// Number of files whose handling failed.
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Failures caused by files that already sit in the target, as on a
    /// re-run with the target inside the source.
    pub fn already_in_target(&self) -> usize {
        self.failures
            .iter()
            .filter(|f| f.is_already_in_target())
            .count()
    }

    /// Number of files that reached a terminal outcome.
    pub fn settled(&self) -> usize {
        self.removed + self.moved + self.spam_skipped + self.failed()
    }

    /// Check that every file of the snapshot has exactly one outcome.
    pub fn is_balanced(&self) -> bool {
        self.settled() == self.total
    }

    /// Share of settled files as a percentage (0.0 to 100.0).
    pub fn percentage(&self) -> f64 {
        if self.total > 0 {
            (self.settled() as f64 / self.total as f64) * 100.0
        } else {
            100.0
        }
    }

    /// Get a human-readable summary of the run.
    pub fn summary(&self) -> String {
        let mut text = format!("Removed: {} | Moved: {}", self.removed, self.moved);
        if self.spam_skipped > 0 {
            text.push_str(&format!(" | Spam kept: {}", self.spam_skipped));
        }
        if !self.failures.is_empty() {
            text.push_str(&format!(" | Failed: {}", self.failures.len()));
        }
        text
    }
}

/// Final result of [`Cleaner::run`](crate::Cleaner::run).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", content = "summary", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The source held no files; nothing was touched.
    NoFiles,
    /// The run went through all stages.
    Completed(RunSummary),
}

impl RunOutcome {
    /// Get the summary, if the run processed any files.
    pub fn summary(&self) -> Option<&RunSummary> {
        match self {
            Self::NoFiles => None,
            Self::Completed(summary) => Some(summary),
        }
    }
}
