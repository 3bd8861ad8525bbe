//! Restore directory merge: locate → check conflicts → move → clean up.
//!
//! Safety comes from ordering alone: the conflict check finishes before the
//! first rename, so a run that would overwrite anything changes nothing.

mod cleanup;
mod conflicts;
mod locate;
mod mover;
mod record;
mod state;

pub use cleanup::remove_candidate;
pub use conflicts::{ensure_no_conflicts, find_conflicts};
pub use locate::{compile_pattern, find_candidates, locate_candidate};
pub use mover::{PROGRESS_EVERY, list_children, move_children, move_children_report};
pub use record::{MoveFailure, MoveOutcome, MoveRecord, MoveReport};
pub use state::{Stage, StageFailure, State};

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::errors::MergeError;
use crate::observer::MergeObserver;
use crate::result::MergeResult;

/// Default name pattern of restore directories created by AWS Backup.
pub const DEFAULT_PATTERN: &str = "aws-backup-restore_*";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Locate and check conflicts, then report what would move without touching anything.
    pub dry_run: bool,
}

/// Inputs of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequest {
    pub root: PathBuf,
    pub pattern: String,
    pub options: MergeOptions,
}

impl MergeRequest {
    pub fn new(root: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            pattern: pattern.into(),
            options: MergeOptions::default(),
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.options.dry_run = dry_run;
        self
    }
}

/// What a successful run did (or, for a dry run, would do).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    pub candidate: PathBuf,
    pub moved: Vec<String>,
    pub dry_run: bool,
}

/// Tracks the current state and reports every transition.
struct Run<'a> {
    state: State,
    observer: &'a mut dyn MergeObserver,
}

impl Run<'_> {
    fn transition(&mut self, to: State) {
        let from = self.state;
        self.state = to;
        self.observer.on_transition(from, to);
    }

    fn advance(&mut self) {
        if let Some(next) = self.state.next() {
            self.transition(next);
        }
    }

    /// Run the stage pending in the current state, failing the run on error.
    fn stage<T>(
        &mut self,
        f: impl FnOnce(&mut dyn MergeObserver) -> Result<T, MergeError>,
    ) -> Result<T, StageFailure> {
        let stage = self.state.pending_stage().unwrap_or(Stage::Cleanup);
        match f(&mut *self.observer) {
            Ok(value) => {
                self.advance();
                Ok(value)
            }
            Err(error) => {
                self.transition(State::Failed(stage));
                Err(StageFailure { stage, error })
            }
        }
    }
}

/// Run the four stages in order. Each runs exactly once; the first failure ends the run.
pub fn run_merge(
    root: &Path,
    pattern: &str,
    options: MergeOptions,
    observer: &mut dyn MergeObserver,
) -> Result<MergeSummary, StageFailure> {
    let mut run = Run {
        state: State::Idle,
        observer,
    };

    let candidate = run.stage(|obs| {
        let candidates = find_candidates(root, pattern)?;
        obs.on_candidates(pattern, &candidates);
        locate::select_single(root, pattern, candidates)
    })?;

    run.stage(|obs| {
        let conflicts = find_conflicts(&candidate, root)?;
        if conflicts.is_empty() {
            return Ok(());
        }
        obs.on_conflicts(&conflicts);
        Err(MergeError::ConflictDetected {
            root: root.to_path_buf(),
            conflicts,
        })
    })?;

    if options.dry_run {
        let planned = match list_children(&candidate) {
            Ok(items) => items
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect::<Vec<_>>(),
            Err(error) => {
                run.transition(State::Failed(Stage::Move));
                return Err(StageFailure {
                    stage: Stage::Move,
                    error,
                });
            }
        };
        // Nothing moves, so the run ends right after validation.
        run.transition(State::Done);
        return Ok(MergeSummary {
            candidate,
            moved: planned,
            dry_run: true,
        });
    }

    let moved = run.stage(|obs| move_children(&candidate, root, obs))?;
    run.stage(|_| remove_candidate(&candidate))?;
    run.advance();

    Ok(MergeSummary {
        candidate,
        moved,
        dry_run: false,
    })
}

/// One full invocation: every outcome, success or failure, becomes a `MergeResult`.
pub fn invoke(request: &MergeRequest, observer: &mut dyn MergeObserver) -> MergeResult {
    let started = Instant::now();
    observer.on_start(&request.root, &request.pattern);

    let result = match run_merge(&request.root, &request.pattern, request.options, observer) {
        Ok(summary) if summary.dry_run => MergeResult::planned(
            &request.root,
            &summary.candidate,
            summary.moved,
            started.elapsed(),
        ),
        Ok(summary) => MergeResult::success(
            &request.root,
            &summary.candidate,
            summary.moved,
            started.elapsed(),
        ),
        Err(failure) => MergeResult::failure(&failure, started.elapsed()),
    };

    observer.on_finish(&result);
    result
}
