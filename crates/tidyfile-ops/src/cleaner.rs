//! The router: drives a snapshot through delete / move / defer.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use tidyfile_core::{CleanConfig, CleanError, FileEntry, ScanError};
use tidyfile_scan::snapshot;

use crate::delete::delete_file;
use crate::events::{CleanEvent, EventEmitter, EventSender};
use crate::move_op::move_into;
use crate::progress::{CleanProgress, ProgressSender};
use crate::report::{ActionOutcome, RunOutcome, RunSummary};
use crate::spam::{ConfirmSpamDeletion, PendingSpam, Staged};
use crate::{FileOperation, OperationError};

/// A file's planned operation, as computed by [`Cleaner::plan`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedAction {
    /// The file.
    pub path: PathBuf,
    /// Its current size.
    pub size: u64,
    /// What a run would do with it.
    pub operation: FileOperation,
}

/// Result of [`Cleaner::plan`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct Plan {
    /// Files whose operation could be decided, in snapshot order.
    pub actions: Vec<PlannedAction>,
    /// Files whose size could not be read.
    pub unreadable: Vec<OperationError>,
}

impl Plan {
    /// Number of planned actions of the given kind.
    pub fn count(&self, operation: FileOperation) -> usize {
        self.actions
            .iter()
            .filter(|a| a.operation == operation)
            .count()
    }
}

/// Classifies and routes every file under a source directory.
///
/// Runs are single-threaded and synchronous. Events go to the attached
/// sender in order, and one progress update per file goes to the attached
/// progress sender.
#[derive(Default)]
pub struct Cleaner {
    events: Option<EventSender>,
    progress: Option<ProgressSender>,
}

impl EventEmitter for Cleaner {
    fn event_sender(&self) -> Option<&EventSender> {
        self.events.as_ref()
    }
}

impl Cleaner {
    /// Create a cleaner without an event sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an event sender.
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Attach a progress sender.
    pub fn with_progress(mut self, progress: ProgressSender) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Run to completion, asking `confirm` once if spam files need a
    /// decision.
    pub fn run(
        &self,
        config: &CleanConfig,
        confirm: &mut impl ConfirmSpamDeletion,
    ) -> Result<RunOutcome, CleanError> {
        let outcome = match self.start(config)? {
            Staged::NoFiles => RunOutcome::NoFiles,
            Staged::Finished(summary) => RunOutcome::Completed(summary),
            Staged::AwaitingConfirmation(pending) => {
                let confirmed = confirm.confirm(pending.paths());
                RunOutcome::Completed(pending.resolve(confirmed))
            }
        };
        Ok(outcome)
    }

    /// Run up to the spam confirmation.
    ///
    /// Returns [`Staged::AwaitingConfirmation`] when a decision is needed;
    /// the caller finishes the run with [`PendingSpam::resolve`].
    pub fn start(&self, config: &CleanConfig) -> Result<Staged, CleanError> {
        let started_at = Utc::now();
        let clock = Instant::now();

        check_source(&config.source)?;
        let snapshot = snapshot(&config.source)?;

        if snapshot.is_empty() {
            self.emit(CleanEvent::NoFiles {
                root: snapshot.root,
            });
            return Ok(Staged::NoFiles);
        }

        let target = self.prepare_target(&config.target)?;
        let mut summary = RunSummary::new(snapshot.len(), started_at);
        let mut progress = CleanProgress::new(snapshot.len());
        let mut deferred = Vec::new();

        for entry in &snapshot {
            let outcome = self.route(entry, &target, config);
            if let Some(event) = outcome.to_event() {
                self.emit(event);
            }
            summary.record(&outcome);
            if let ActionOutcome::DeferredSpam { path } = outcome {
                deferred.push(path);
            }

            progress.advance(entry.path.clone());
            if let Some(tx) = &self.progress {
                // A dropped receiver is not an error
                let _ = tx.send(progress.clone());
            }
        }

        let pending = PendingSpam::new(
            deferred,
            summary,
            config.delete_mode,
            self.events.clone(),
            clock,
        );
        Ok(pending.begin(config.delete_spam))
    }

    /// Decide every file of the source without touching anything.
    pub fn plan(&self, config: &CleanConfig) -> Result<Plan, CleanError> {
        check_source(&config.source)?;
        let snapshot = snapshot(&config.source)?;
        let mut plan = Plan::default();

        for entry in &snapshot {
            match entry.read_size() {
                Ok(size) => plan.actions.push(PlannedAction {
                    path: entry.path.clone(),
                    size,
                    operation: FileOperation::decide(size, &entry.name),
                }),
                Err(e) => plan.unreadable.push(OperationError::new(
                    &entry.path,
                    format!("Failed to read size: {e}"),
                )),
            }
        }

        Ok(plan)
    }

    /// Make sure the target directory exists and return its canonical path.
    fn prepare_target(&self, target: &Path) -> Result<PathBuf, CleanError> {
        match fs::metadata(target) {
            Ok(m) if m.is_dir() => {}
            Ok(_) => {
                return Err(CleanError::TargetNotDirectory {
                    path: target.to_path_buf(),
                });
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                fs::create_dir_all(target).map_err(|source| CleanError::TargetCreate {
                    path: target.to_path_buf(),
                    source,
                })?;
                self.emit(CleanEvent::TargetCreated {
                    path: target.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(CleanError::TargetCreate {
                    path: target.to_path_buf(),
                    source,
                });
            }
        }

        Ok(target
            .canonicalize()
            .unwrap_or_else(|_| target.to_path_buf()))
    }

    /// Decide and carry out the main-pass action for one file.
    fn route(&self, entry: &FileEntry, target: &Path, config: &CleanConfig) -> ActionOutcome {
        let size = match entry.read_size() {
            Ok(size) => size,
            Err(e) => {
                return ActionOutcome::Failed(OperationError::new(
                    &entry.path,
                    format!("Failed to read size: {e}"),
                ));
            }
        };

        let operation = FileOperation::decide(size, &entry.name);
        debug!(path = %entry.path.display(), size, %operation, "routing");

        match operation {
            FileOperation::Delete => match delete_file(&entry.path, config.delete_mode) {
                Ok(()) => ActionOutcome::Deleted {
                    path: entry.path.clone(),
                },
                Err(err) => ActionOutcome::Failed(err),
            },
            FileOperation::DeferSpam => ActionOutcome::DeferredSpam {
                path: entry.path.clone(),
            },
            FileOperation::Move => match move_into(&entry.path, target, config.collision) {
                Ok(to) => ActionOutcome::Moved {
                    from: entry.path.clone(),
                    to,
                    bytes: size,
                },
                Err(err) => ActionOutcome::Failed(err),
            },
        }
    }
}

/// Reject a missing or non-directory source before anything happens.
fn check_source(source: &Path) -> Result<(), CleanError> {
    match fs::metadata(source) {
        Ok(m) if m.is_dir() => Ok(()),
        Ok(_) => Err(CleanError::SourceNotDirectory {
            path: source.to_path_buf(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(CleanError::SourceMissing {
            path: source.to_path_buf(),
        }),
        Err(e) => Err(ScanError::io(source, e).into()),
    }
}
