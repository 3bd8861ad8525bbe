//! Invocation state machine.
//!
//! `Idle → Located → Validated → Merged → CleanedUp → Done`, with `Failed(stage)`
//! reachable from any non-terminal state. Each stage runs at most once.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::errors::MergeError;

/// The stage a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Locate,
    CheckConflicts,
    Move,
    Cleanup,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Locate => "locate",
            Stage::CheckConflicts => "check_conflicts",
            Stage::Move => "move",
            Stage::Cleanup => "cleanup",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Located,
    Validated,
    Merged,
    CleanedUp,
    Done,
    Failed(Stage),
}

impl State {
    /// Successor on the happy path; `None` for terminal states.
    pub fn next(self) -> Option<State> {
        match self {
            State::Idle => Some(State::Located),
            State::Located => Some(State::Validated),
            State::Validated => Some(State::Merged),
            State::Merged => Some(State::CleanedUp),
            State::CleanedUp => Some(State::Done),
            State::Done | State::Failed(_) => None,
        }
    }

    /// Stage that runs when leaving this state.
    pub fn pending_stage(self) -> Option<Stage> {
        match self {
            State::Idle => Some(Stage::Locate),
            State::Located => Some(Stage::CheckConflicts),
            State::Validated => Some(Stage::Move),
            State::Merged => Some(Stage::Cleanup),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, State::Done | State::Failed(_))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Idle => f.write_str("idle"),
            State::Located => f.write_str("located"),
            State::Validated => f.write_str("validated"),
            State::Merged => f.write_str("merged"),
            State::CleanedUp => f.write_str("cleaned_up"),
            State::Done => f.write_str("done"),
            State::Failed(stage) => write!(f, "failed({stage})"),
        }
    }
}

/// A terminal failure together with the stage that produced it.
#[derive(Debug, Error)]
#[error("{stage} stage failed: {error}")]
pub struct StageFailure {
    pub stage: Stage,
    #[source]
    pub error: MergeError,
}
