//! CLI definition and parsing.
//! The binary is a thin invocation wrapper: flags override config values, the
//! core runs once, and the result is printed.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - --json switches log format; --output selects how the result itself is printed.

use clap::{Parser, ValueEnum, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// The structured result as JSON on stdout
    #[default]
    Json,
    /// A short human-readable summary
    Text,
}

/// Merge a single backup-restore directory into its root.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Merge a backup-restore directory into its root without overwriting anything"
)]
pub struct Args {
    /// Destination root that contains the restore directory.
    #[arg(long, value_hint = ValueHint::DirPath, help = "Destination root (default /mnt/efs)")]
    pub root: Option<PathBuf>,

    /// Glob matched against directory names directly under the root.
    #[arg(long, help = "Restore directory name pattern (default aws-backup-restore_*)")]
    pub pattern: Option<String>,

    /// Locate and check conflicts, but do not move or remove anything.
    #[arg(long, help = "Show what would be moved, but do not modify anything")]
    pub dry_run: bool,

    /// Result format printed on stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Append logs to this file in addition to stderr.
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print the config file location in use, then exit.
    #[arg(long, help = "Print the config file location used by restore_merge and exit")]
    pub print_config: bool,
}

impl Args {
    /// Precedence: --debug > --log-level value > None (use config).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(root) = &self.root {
            cfg.root = root.clone();
        }
        if let Some(pattern) = &self.pattern {
            cfg.pattern = pattern.clone();
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(log_file) = &self.log_file {
            cfg.log_file = Some(log_file.clone());
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
