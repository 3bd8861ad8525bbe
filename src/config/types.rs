//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::ROOT_DEFAULT;
use crate::merge::{DEFAULT_PATTERN, MergeOptions, MergeRequest};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Checkpoints and progress (default)
    #[default]
    Normal,
    /// Adds per-entry details
    Info,
    /// Everything, including state transitions
    Debug,
}

impl LogLevel {
    /// Parse common names (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        })
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Destination root; the restore directory is searched directly under it
    pub root: PathBuf,
    /// Glob matched against directory names under `root`
    pub pattern: String,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional log file (stderr logging stays on)
    pub log_file: Option<PathBuf>,
    /// Report what would move without modifying anything
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from(ROOT_DEFAULT),
            pattern: DEFAULT_PATTERN.to_string(),
            log_level: LogLevel::Normal,
            log_file: None,
            dry_run: false,
        }
    }
}

impl Config {
    pub fn new(root: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            pattern: pattern.into(),
            ..Default::default()
        }
    }

    /// The core invocation described by this config.
    pub fn request(&self) -> MergeRequest {
        MergeRequest {
            root: self.root.clone(),
            pattern: self.pattern.clone(),
            options: MergeOptions {
                dry_run: self.dry_run,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_aliases() {
        assert_eq!(LogLevel::parse(" TRACE "), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("none"), Some(LogLevel::Quiet));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn defaults_target_efs_mount() {
        let cfg = Config::default();
        assert_eq!(cfg.root, PathBuf::from("/mnt/efs"));
        assert_eq!(cfg.pattern, "aws-backup-restore_*");
        assert!(!cfg.request().options.dry_run);
    }
}
