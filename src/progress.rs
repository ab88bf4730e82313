// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Progress reporting for the per-kind mirror tasks
//!
//! The synchronizer's tasks report probe, list and watch milestones here,
//! which the CLI displays while waiting for the initial sync.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::broadcast;

/// Create a spinner with consistent styling
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Progress update message
#[derive(Clone, Debug)]
pub enum ProgressUpdate {
    /// Asking the server whether it serves a kind
    Probing { kind: String },
    /// The server does not serve a kind; it is skipped from now on
    Unsupported { kind: String },
    /// A full list completed
    Listed {
        kind: String,
        items: usize,
        elapsed_ms: u64,
        initial: bool,
    },
    /// A watch ended and is being re-established
    WatchRestarted { kind: String, reason: String },
}

impl ProgressUpdate {
    pub fn kind(&self) -> &str {
        match self {
            ProgressUpdate::Probing { kind }
            | ProgressUpdate::Unsupported { kind }
            | ProgressUpdate::Listed { kind, .. }
            | ProgressUpdate::WatchRestarted { kind, .. } => kind,
        }
    }
}

/// Progress reporter shared by all mirror tasks
pub struct ProgressReporter {
    sender: broadcast::Sender<ProgressUpdate>,
    /// Kinds that finished their initial list or were found unsupported
    kinds_done: AtomicUsize,
    /// Kinds being mirrored
    kinds_total: AtomicUsize,
}

impl ProgressReporter {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self {
            sender,
            kinds_done: AtomicUsize::new(0),
            kinds_total: AtomicUsize::new(0),
        }
    }

    /// Subscribe to progress updates
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressUpdate> {
        self.sender.subscribe()
    }

    /// Reset counters for a new set of kinds
    pub fn start(&self, kind_count: usize) {
        self.kinds_done.store(0, Ordering::SeqCst);
        self.kinds_total.store(kind_count, Ordering::SeqCst);
    }

    pub fn probing(&self, kind: &str) {
        let _ = self.sender.send(ProgressUpdate::Probing {
            kind: kind.to_string(),
        });
    }

    pub fn unsupported(&self, kind: &str) {
        self.kinds_done.fetch_add(1, Ordering::SeqCst);
        let _ = self.sender.send(ProgressUpdate::Unsupported {
            kind: kind.to_string(),
        });
    }

    /// Report a completed list; the first one per kind counts towards progress
    pub fn listed(&self, kind: &str, items: usize, elapsed_ms: u64, initial: bool) {
        if initial {
            self.kinds_done.fetch_add(1, Ordering::SeqCst);
        }
        let _ = self.sender.send(ProgressUpdate::Listed {
            kind: kind.to_string(),
            items,
            elapsed_ms,
            initial,
        });
    }

    pub fn watch_restarted(&self, kind: &str, reason: &str) {
        let _ = self.sender.send(ProgressUpdate::WatchRestarted {
            kind: kind.to_string(),
            reason: reason.to_string(),
        });
    }

    /// Get current progress (done/total)
    pub fn progress(&self) -> (usize, usize) {
        (
            self.kinds_done.load(Ordering::SeqCst),
            self.kinds_total.load(Ordering::SeqCst),
        )
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe handle to progress reporter
pub type ProgressHandle = Arc<ProgressReporter>;

/// Create a new progress reporter handle
pub fn create_progress_handle() -> ProgressHandle {
    Arc::new(ProgressReporter::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reporter_default() {
        let reporter = ProgressReporter::default();
        assert_eq!(reporter.progress(), (0, 0));
    }

    #[test]
    fn test_initial_lists_and_unsupported_count_as_done() {
        let reporter = ProgressReporter::new();
        reporter.start(3);

        reporter.listed("pod", 10, 100, true);
        assert_eq!(reporter.progress(), (1, 3));

        reporter.listed("pod", 12, 90, false);
        assert_eq!(reporter.progress(), (1, 3));

        reporter.unsupported("disk");
        assert_eq!(reporter.progress(), (2, 3));
    }

    #[test]
    fn test_start_resets_counters() {
        let reporter = ProgressReporter::new();
        reporter.start(2);
        reporter.unsupported("disk");
        reporter.start(5);
        assert_eq!(reporter.progress(), (0, 5));
    }

    #[test]
    fn test_subscribe_receives_updates_in_order() {
        let reporter = ProgressReporter::new();
        let mut receiver = reporter.subscribe();

        reporter.probing("pod");
        reporter.listed("pod", 3, 20, true);
        reporter.watch_restarted("pod", "expired");
        reporter.unsupported("cstor_pool");

        let updates: Vec<_> = std::iter::from_fn(|| receiver.try_recv().ok()).collect();
        assert_eq!(updates.len(), 4);
        assert!(matches!(updates[0], ProgressUpdate::Probing { .. }));
        assert!(matches!(
            updates[1],
            ProgressUpdate::Listed {
                items: 3,
                initial: true,
                ..
            }
        ));
        assert!(matches!(updates[2], ProgressUpdate::WatchRestarted { .. }));
        assert_eq!(updates[3].kind(), "cstor_pool");
    }

    #[test]
    fn test_send_without_subscribers_is_harmless() {
        let handle = create_progress_handle();
        handle.probing("pod");
        assert_eq!(handle.progress(), (0, 0));
    }
}
