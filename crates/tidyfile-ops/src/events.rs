//! Ordered event stream of a cleaning run.
//!
//! A run emits, in order: `TargetCreated` (optional), one `Deleted`,
//! `Moved` or `Failed` per handled file, then the spam stage
//! (`SpamDetected`, followed by `SpamDeletionDisabled` or by
//! `ConfirmationRequested`, `ConfirmationResponse` and `SpamDeleted` /
//! `SpamSkipped`), and finally `Completed`. An empty snapshot produces a
//! single `NoFiles` instead.
//!
//! Sending never blocks and needs no async runtime; a dropped receiver is
//! ignored.

use std::path::PathBuf;

use serde::Serialize;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

/// Sender half of the event channel.
pub type EventSender = UnboundedSender<CleanEvent>;

/// Receiver half of the event channel.
pub type EventReceiver = UnboundedReceiver<CleanEvent>;

/// Create a new event channel.
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// A single observable step of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CleanEvent {
    /// The target directory did not exist and was created.
    TargetCreated { path: PathBuf },
    /// The source contained no files; nothing was touched.
    NoFiles { root: PathBuf },
    /// An empty file was deleted.
    Deleted { path: PathBuf },
    /// A file was moved into the target.
    Moved {
        from: PathBuf,
        to: PathBuf,
        bytes: u64,
    },
    /// Handling a single file failed; the run continues.
    Failed { path: PathBuf, message: String },
    /// Spam-named files were set aside during the main pass.
    SpamDetected { paths: Vec<PathBuf> },
    /// Spam deletion is turned off; the files stay where they are.
    SpamDeletionDisabled { count: usize },
    /// The run is waiting for a yes/no decision on the spam files.
    ConfirmationRequested { count: usize },
    /// The decision was supplied.
    ConfirmationResponse { confirmed: bool },
    /// Confirmed spam files were deleted (`count` successes).
    SpamDeleted { count: usize },
    /// Spam deletion was declined.
    SpamSkipped { count: usize },
    /// The run finished.
    Completed {
        removed: usize,
        moved: usize,
        total: usize,
        percent: f64,
    },
}

impl CleanEvent {
    /// Mirror this event to the tracing subscriber.
    pub fn log(&self) {
        match self {
            Self::TargetCreated { path } => info!(path = %path.display(), "created target directory"),
            Self::NoFiles { root } => info!(root = %root.display(), "no files to process"),
            Self::Deleted { path } => info!(path = %path.display(), "deleted empty file"),
            Self::Moved { from, to, bytes } => {
                info!(from = %from.display(), to = %to.display(), bytes, "moved")
            }
            Self::Failed { path, message } => warn!(path = %path.display(), %message, "failed"),
            Self::SpamDetected { paths } => {
                info!(count = paths.len(), "spam files detected");
                for path in paths {
                    debug!(path = %path.display(), "spam");
                }
            }
            Self::SpamDeletionDisabled { count } => info!(count, "spam deletion disabled"),
            Self::ConfirmationRequested { count } => debug!(count, "waiting for confirmation"),
            Self::ConfirmationResponse { confirmed } => debug!(confirmed, "confirmation received"),
            Self::SpamDeleted { count } => info!(count, "deleted spam files"),
            Self::SpamSkipped { count } => info!(count, "skipped spam deletion"),
            Self::Completed {
                removed,
                moved,
                total,
                ..
            } => info!(removed, moved, total, "completed"),
        }
    }
}

/// Anything that can publish [`CleanEvent`]s.
pub trait EventEmitter {
    /// Get the event sender, if one is attached.
    fn event_sender(&self) -> Option<&EventSender>;

    /// Log and publish an event.
    fn emit(&self, event: CleanEvent) {
        event.log();
        if let Some(sender) = self.event_sender() {
            // Ignore send errors - if receiver is dropped, we just continue
            let _ = sender.send(event);
        }
    }
}

impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}

impl EventEmitter for Option<EventSender> {
    fn event_sender(&self) -> Option<&EventSender> {
        self.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_without_runtime() {
        let (tx, mut rx) = channel();
        tx.emit(CleanEvent::SpamSkipped { count: 2 });
        assert_eq!(rx.try_recv().unwrap(), CleanEvent::SpamSkipped { count: 2 });
    }

    #[test]
    fn test_emit_with_dropped_receiver() {
        let (tx, rx) = channel();
        drop(rx);
        tx.emit(CleanEvent::SpamDeleted { count: 1 });
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let event = CleanEvent::Completed {
            removed: 2,
            moved: 1,
            total: 3,
            percent: 100.0,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "completed");
        assert_eq!(json["removed"], 2);
        assert_eq!(json["percent"], 100.0);
    }
}
