//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the Ctrl-C handler,
//! invokes the merge once and prints the result.

use anyhow::{Context, Result};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use restore_merge::cli::{Args, OutputFormat};
use restore_merge::config::{default_config_path, load_config, validate_and_normalize};
use restore_merge::output as out;
use restore_merge::{MergeResult, TracingObserver, invoke};

use crate::logging::init_tracing;

/// Exit status for configuration problems detected before the merge runs.
const EXIT_CONFIG: u8 = 2;
/// Conventional 128 + SIGINT.
const EXIT_INTERRUPTED: i32 = 130;

/// Run the CLI application.
pub fn run(args: Args) -> ExitCode {
    if args.print_config {
        match default_config_path() {
            Ok(p) => {
                out::print_info(&format!("restore_merge config path:\n  {}\n", p.display()));
                if !p.exists() {
                    out::print_info("No config file exists there; built-in defaults are used.");
                }
            }
            Err(e) => out::print_error(&format!("Could not determine a config path: {e:#}")),
        }
        return ExitCode::SUCCESS;
    }

    let (result, guard_slot) = match prepare_and_invoke(&args) {
        Ok(outcome) => outcome,
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let printed = print_result(&result, args.output);

    // Flush file logs before exiting.
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    if let Err(e) = printed {
        out::print_error(&format!("Failed to print result: {e:#}"));
        return ExitCode::FAILURE;
    }
    ExitCode::from(u8::try_from(result.exit_code).unwrap_or(1))
}

type GuardSlot = Arc<Mutex<Option<tracing_appender::non_blocking::WorkerGuard>>>;

fn prepare_and_invoke(args: &Args) -> Result<(MergeResult, GuardSlot)> {
    let loaded = load_config()?;
    let mut cfg = loaded.config;
    args.apply_overrides(&mut cfg);

    let guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json)
        .context("Failed to initialize logging")?;

    // The core has no cancellation point; on Ctrl-C flush logs and exit.
    let guard_slot: GuardSlot = Arc::new(Mutex::new(guard));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            out::print_warn("Received interrupt; the merge was not completed.");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
            std::process::exit(EXIT_INTERRUPTED);
        })
        .context("failed to install signal handler")?;
    }

    match &loaded.source {
        Some(path) => info!(config = %path.display(), "Loaded config"),
        None => debug!("No config file found; using defaults"),
    }
    debug!(?args, "Starting restore_merge");

    validate_and_normalize(&mut cfg)?;
    info!(root = %cfg.root.display(), pattern = %cfg.pattern, dry_run = cfg.dry_run, "Using restore directory pattern");

    let result = invoke(&cfg.request(), &mut TracingObserver);
    Ok((result, guard_slot))
}

fn print_result(result: &MergeResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => out::print_user(&result.to_json()?),
        OutputFormat::Text => out::print_result_text(result),
    }
    Ok(())
}
