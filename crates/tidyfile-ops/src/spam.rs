//! Deferred spam resolution.
//!
//! Spam-named files are never touched during the main pass. Once the pass
//! is over they are announced together and, if spam deletion is enabled,
//! a single yes/no decision settles all of them.

use std::path::PathBuf;
use std::time::Instant;

use tidyfile_core::DeleteMode;
use tracing::debug;

use crate::delete::delete_file;
use crate::events::{CleanEvent, EventEmitter, EventSender};
use crate::report::{RunSummary, SpamOutcome};

/// Supplies the yes/no decision for deleting the deferred spam files.
pub trait ConfirmSpamDeletion {
    /// Return `true` to delete every file in `paths`.
    fn confirm(&mut self, paths: &[PathBuf]) -> bool;
}

impl<F> ConfirmSpamDeletion for F
where
    F: FnMut(&[PathBuf]) -> bool,
{
    fn confirm(&mut self, paths: &[PathBuf]) -> bool {
        self(paths)
    }
}

/// A fixed answer, for non-interactive runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssumeAnswer(pub bool);

impl ConfirmSpamDeletion for AssumeAnswer {
    fn confirm(&mut self, _paths: &[PathBuf]) -> bool {
        self.0
    }
}

/// Stage reached by [`Cleaner::start`](crate::Cleaner::start).
#[derive(Debug)]
pub enum Staged {
    /// The source held no files; nothing was touched.
    NoFiles,
    /// The run is complete without needing a decision.
    Finished(RunSummary),
    /// The main pass is done and the spam files wait for a decision.
    AwaitingConfirmation(PendingSpam),
}

/// A run suspended at the spam confirmation.
///
/// Dropping it leaves every deferred file in place without emitting
/// `Completed`.
#[derive(Debug)]
#[must_use = "a pending run does nothing until it is resolved"]
pub struct PendingSpam {
    deferred: Vec<PathBuf>,
    summary: RunSummary,
    delete_mode: DeleteMode,
    events: Option<EventSender>,
    clock: Instant,
}

impl EventEmitter for PendingSpam {
    fn event_sender(&self) -> Option<&EventSender> {
        self.events.as_ref()
    }
}

impl PendingSpam {
    pub(crate) fn new(
        deferred: Vec<PathBuf>,
        summary: RunSummary,
        delete_mode: DeleteMode,
        events: Option<EventSender>,
        clock: Instant,
    ) -> Self {
        Self {
            deferred,
            summary,
            delete_mode,
            events,
            clock,
        }
    }

    /// The spam files awaiting a decision, in snapshot order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.deferred
    }

    /// Counters as of the end of the main pass.
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Move past the main pass: announce the deferred files and either
    /// settle them or ask for a decision.
    pub(crate) fn begin(self, delete_spam: bool) -> Staged {
        if self.deferred.is_empty() {
            return Staged::Finished(self.finish());
        }

        self.emit(CleanEvent::SpamDetected {
            paths: self.deferred.clone(),
        });

        if !delete_spam {
            self.emit(CleanEvent::SpamDeletionDisabled {
                count: self.deferred.len(),
            });
            return Staged::Finished(self.skip_all().finish());
        }

        self.emit(CleanEvent::ConfirmationRequested {
            count: self.deferred.len(),
        });
        Staged::AwaitingConfirmation(self)
    }

    /// Supply the decision and finish the run.
    pub fn resolve(self, confirmed: bool) -> RunSummary {
        self.emit(CleanEvent::ConfirmationResponse { confirmed });

        if confirmed {
            self.delete_all().finish()
        } else {
            let count = self.deferred.len();
            let pending = self.skip_all();
            pending.emit(CleanEvent::SpamSkipped { count });
            pending.finish()
        }
    }

    fn skip_all(mut self) -> Self {
        for _ in 0..self.deferred.len() {
            self.summary.record_spam(&SpamOutcome::Skipped);
        }
        self
    }

    fn delete_all(mut self) -> Self {
        let mut deleted = 0;

        for path in &self.deferred {
            let outcome = match delete_file(path, self.delete_mode) {
                Ok(()) => {
                    debug!(path = %path.display(), "deleted spam file");
                    deleted += 1;
                    SpamOutcome::Deleted
                }
                Err(err) => {
                    self.emit(CleanEvent::Failed {
                        path: err.path.clone(),
                        message: err.message.clone(),
                    });
                    SpamOutcome::Failed(err)
                }
            };
            self.summary.record_spam(&outcome);
        }

        self.emit(CleanEvent::SpamDeleted { count: deleted });
        self
    }

    fn finish(mut self) -> RunSummary {
        self.summary.duration = self.clock.elapsed();
        self.emit(CleanEvent::Completed {
            removed: self.summary.removed,
            moved: self.summary.moved,
            total: self.summary.total,
            percent: 100.0,
        });
        self.summary
    }
}
