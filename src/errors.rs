//! Typed error definitions for restore_merge.
//! One variant per failure mode so callers (and the CLI exit status) can branch on kind.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::merge::MoveFailure;

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Root directory does not exist or is not a directory: {}", .0.display())]
    RootInvalid(PathBuf),

    #[error("Invalid restore directory pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("No directories found matching pattern '{pattern}' in {}", .root.display())]
    NotFound { pattern: String, root: PathBuf },

    #[error(
        "Multiple restore directories found: {}. Only one restore directory is allowed.",
        join_paths(.matches)
    )]
    AmbiguousMatch { pattern: String, matches: Vec<PathBuf> },

    #[error(
        "Conflicts detected. The following files/directories already exist in {}: {}",
        .root.display(),
        join_paths(.conflicts)
    )]
    ConflictDetected { root: PathBuf, conflicts: Vec<PathBuf> },

    #[error(
        "Failed to move {} of {} items: {}",
        .failed.len(),
        total_items(.moved, .failed),
        join_failures(.failed)
    )]
    PartialMoveFailure { moved: Vec<String>, failed: Vec<MoveFailure> },

    #[error("Directory {} is not empty ({remaining} entries left), cannot remove", .path.display())]
    DirectoryNotEmpty { path: PathBuf, remaining: usize },

    #[error("Failed to remove directory {}: {source}", .path.display())]
    RemovalFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{context}: {source}")]
    UnexpectedFailure {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl MergeError {
    /// Process exit status for this failure (0 and 2 are reserved by the CLI).
    pub fn code(&self) -> i32 {
        match self {
            MergeError::NotFound { .. } => 10,
            MergeError::AmbiguousMatch { .. } => 11,
            MergeError::ConflictDetected { .. } => 12,
            MergeError::PartialMoveFailure { .. } => 13,
            MergeError::DirectoryNotEmpty { .. } => 14,
            MergeError::RemovalFailed { .. } => 15,
            MergeError::RootInvalid(_) => 16,
            MergeError::InvalidPattern { .. } => 17,
            MergeError::UnexpectedFailure { .. } => 1,
        }
    }

    /// Stable snake_case name, used in structured logs and the JSON result.
    pub fn kind(&self) -> &'static str {
        match self {
            MergeError::RootInvalid(_) => "root_invalid",
            MergeError::InvalidPattern { .. } => "invalid_pattern",
            MergeError::NotFound { .. } => "not_found",
            MergeError::AmbiguousMatch { .. } => "ambiguous_match",
            MergeError::ConflictDetected { .. } => "conflict_detected",
            MergeError::PartialMoveFailure { .. } => "partial_move_failure",
            MergeError::DirectoryNotEmpty { .. } => "directory_not_empty",
            MergeError::RemovalFailed { .. } => "removal_failed",
            MergeError::UnexpectedFailure { .. } => "unexpected_failure",
        }
    }

    pub(crate) fn unexpected(context: impl Into<String>, source: io::Error) -> Self {
        MergeError::UnexpectedFailure {
            context: context.into(),
            source,
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn total_items(moved: &[String], failed: &[MoveFailure]) -> usize {
    moved.len() + failed.len()
}

fn join_failures(failed: &[MoveFailure]) -> String {
    failed
        .iter()
        .map(|f| format!("{} ({})", f.name, f.error))
        .collect::<Vec<_>>()
        .join(", ")
}
