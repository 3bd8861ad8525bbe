use clap::Parser;
use std::path::PathBuf;

use restore_merge::cli::{Args, OutputFormat};
use restore_merge::config::types::{Config, LogLevel};

#[test]
fn defaults_leave_config_untouched() {
    let args = Args::parse_from(["restore_merge"]);
    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg, Config::default());
    assert_eq!(args.output, OutputFormat::Json);
}

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["restore_merge", "--debug", "--log-level", "quiet"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Debug));

    let args = Args::parse_from(["restore_merge", "--log-level", "info"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Info));
}

#[test]
fn apply_overrides_sets_flags() {
    let args = Args::parse_from([
        "restore_merge",
        "--root",
        "/data",
        "--pattern",
        "restore-*",
        "--log-file",
        "/var/log/rm.log",
        "--dry-run",
        "--output",
        "text",
    ]);
    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.root, PathBuf::from("/data"));
    assert_eq!(cfg.pattern, "restore-*");
    assert_eq!(cfg.log_file, Some(PathBuf::from("/var/log/rm.log")));
    assert!(cfg.dry_run);
    assert_eq!(args.output, OutputFormat::Text);
}
