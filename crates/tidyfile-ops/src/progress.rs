//! Progress reporting for the main pass.

use std::path::PathBuf;

use serde::Serialize;
use tokio::sync::mpsc;

/// Sending half of a progress channel.
pub type ProgressSender = mpsc::UnboundedSender<CleanProgress>;

/// Receiving half of a progress channel.
pub type ProgressReceiver = mpsc::UnboundedReceiver<CleanProgress>;

/// Create a progress channel.
///
/// Unbounded, so a receiver drained after the run still sees one update
/// per file.
pub fn channel() -> (ProgressSender, ProgressReceiver) {
    mpsc::unbounded_channel()
}

/// Progress information published after each file decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanProgress {
    /// Number of files decided so far.
    pub processed: usize,
    /// Snapshot size.
    pub total: usize,
    /// The file most recently decided.
    pub current: Option<PathBuf>,
}

impl CleanProgress {
    /// Create a new progress tracker for a snapshot of `total` files.
    pub fn new(total: usize) -> Self {
        Self {
            processed: 0,
            total,
            current: None,
        }
    }

    /// Get the progress as a percentage (0.0 to 100.0).
    pub fn percentage(&self) -> f64 {
        if self.total > 0 {
            (self.processed as f64 / self.total as f64) * 100.0
        } else {
            100.0
        }
    }

    /// Record that `path` has been decided.
    pub fn advance(&mut self, path: PathBuf) {
        self.processed += 1;
        self.current = Some(path);
    }

    /// Check if every file has been decided.
    pub fn is_done(&self) -> bool {
        self.processed >= self.total
    }
}
