//! Checkpoint notifications for a merge invocation.
//!
//! The core never touches a process-wide logger directly; it reports to a
//! `MergeObserver` passed in by the caller. `TracingObserver` forwards every
//! checkpoint to `tracing` with structured fields.

use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::merge::State;
use crate::result::MergeResult;

/// Counts reported by the mover every `PROGRESS_EVERY` items and on the last item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
    pub moved: usize,
    pub failed: usize,
}

/// Observer hooks. All methods default to no-ops; none can affect control flow.
pub trait MergeObserver {
    fn on_start(&mut self, _root: &Path, _pattern: &str) {}

    fn on_transition(&mut self, _from: State, _to: State) {}

    fn on_candidates(&mut self, _pattern: &str, _candidates: &[PathBuf]) {}

    fn on_conflicts(&mut self, _conflicts: &[PathBuf]) {}

    fn on_move_started(&mut self, _candidate: &Path, _total: usize) {}

    fn on_progress(&mut self, _progress: Progress) {}

    fn on_item_failed(&mut self, _name: &str, _error: &str) {}

    fn on_finish(&mut self, _result: &MergeResult) {}
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl MergeObserver for NoopObserver {}

/// Emits each checkpoint as a structured `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl MergeObserver for TracingObserver {
    fn on_start(&mut self, root: &Path, pattern: &str) {
        info!(root = %root.display(), pattern, "Starting restore directory merge");
    }

    fn on_transition(&mut self, from: State, to: State) {
        debug!(from = %from, to = %to, "state transition");
    }

    fn on_candidates(&mut self, pattern: &str, candidates: &[PathBuf]) {
        let dirs: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
        info!(
            pattern,
            count = candidates.len(),
            directories = ?dirs,
            "Found {} directories matching pattern '{}'",
            candidates.len(),
            pattern
        );
    }

    fn on_conflicts(&mut self, conflicts: &[PathBuf]) {
        let paths: Vec<String> = conflicts.iter().map(|p| p.display().to_string()).collect();
        warn!(count = conflicts.len(), conflicts = ?paths, "Found {} conflicts", conflicts.len());
    }

    fn on_move_started(&mut self, candidate: &Path, total: usize) {
        info!(candidate = %candidate.display(), total, "Starting to move {total} items");
    }

    fn on_progress(&mut self, p: Progress) {
        info!(
            processed = p.processed,
            total = p.total,
            moved = p.moved,
            failed = p.failed,
            "Progress: {}/{} items processed",
            p.processed,
            p.total
        );
    }

    fn on_item_failed(&mut self, name: &str, err: &str) {
        warn!(item = name, error = err, "Failed to move {name}");
    }

    fn on_finish(&mut self, result: &MergeResult) {
        let secs = result.execution_time_seconds;
        if result.is_ok() {
            info!(
                restore_directory = result.restore_directory.as_deref().unwrap_or_default(),
                moved = result.moved_items_count.unwrap_or_default(),
                execution_time_seconds = secs,
                "{}",
                result.message
            );
        } else {
            error!(
                kind = result.error_kind.unwrap_or("unknown"),
                stage = result.stage.map(|s| s.as_str()).unwrap_or("unknown"),
                error = result.error.as_deref().unwrap_or_default(),
                execution_time_seconds = secs,
                "{}",
                result.message
            );
        }
    }
}
