//! Core library for `restore_merge`.
//!
//! Finds the single backup-restore directory under a root, verifies that none
//! of its contents would overwrite anything, moves its top-level entries into
//! the root and removes the emptied directory. Every invocation ends in one
//! [`MergeResult`]; progress is reported to an injected [`MergeObserver`].

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod merge;
pub mod observer;
pub mod output;
pub mod platform;
pub mod result;

pub use config::{Config, LogLevel, default_config_path, load_config_from_xml_path, path_has_symlink_ancestor};
pub use errors::MergeError;
pub use merge::{
    DEFAULT_PATTERN, MergeOptions, MergeRequest, MergeSummary, Stage, StageFailure, State, invoke,
    run_merge,
};
pub use observer::{MergeObserver, NoopObserver, Progress, TracingObserver};
pub use result::{MergeResult, Status};
