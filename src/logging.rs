//! Tracing initialization.
//! Builds a subscriber with EnvFilter, compact or JSON formatting, and optional file logging.
//!
//! Behavior:
//! - Log level is driven by LogLevel (no RUST_LOG override here).
//! - Console logs go to stderr; stdout is reserved for the merge result.
//! - If `log_file` is provided and passes safety checks, a non-blocking file layer is added.
//!
//! We refuse file logging if any ancestor of the file path is a symlink.

use anyhow::Result;
use chrono::Local;
use restore_merge::config::default_log_path;
use restore_merge::output as out;
use restore_merge::platform::open_log_file_secure_append;
use restore_merge::{LogLevel, path_has_symlink_ancestor};
use std::fmt as stdfmt;
use std::path::Path;
use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, registry};

/// Human-friendly timestamp formatter (DD/MM/YY HH:MM:SS)
struct LocalHumanTime;
impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%d/%m/%y %H:%M:%S"))
    }
}

#[inline]
fn to_level_filter(lvl: LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Quiet => LevelFilter::ERROR,
        LogLevel::Normal => LevelFilter::INFO,
        LogLevel::Info => LevelFilter::DEBUG,
        LogLevel::Debug => LevelFilter::TRACE,
    }
}

/// One formatting layer; JSON or compact, with or without ANSI colors.
fn fmt_layer<S, W>(json: bool, ansi: bool, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tsfmt::layer()
        .with_writer(writer)
        .with_timer(LocalHumanTime)
        .with_level(true)
        .with_target(true)
        .with_ansi(ansi);
    if json {
        layer.json().boxed()
    } else {
        layer.compact().boxed()
    }
}

/// Open a non-blocking file writer, or explain on stderr why not.
fn maybe_open_non_blocking_writer(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    match path_has_symlink_ancestor(path) {
        Ok(true) => {
            out::print_warn(&format!(
                "Refusing to enable file logging: ancestor of {} is a symlink; logging to stderr only.",
                path.display()
            ));
            return None;
        }
        Err(e) => {
            out::print_warn(&format!(
                "Error checking log path {} for symlinks: {}; logging to stderr only.",
                path.display(),
                e
            ));
            return None;
        }
        Ok(false) => {}
    }

    match open_log_file_secure_append(path) {
        Ok(file) => Some(tracing_appender::non_blocking(file)),
        Err(e) => {
            out::print_warn(&format!(
                "Failed to open log file {}: {}; check that the directory is writable. Logging to stderr only.",
                path.display(),
                e
            ));
            None
        }
    }
}

/// Initialize tracing. Returns the file appender's WorkerGuard, which must be
/// held until exit so buffered lines are flushed.
pub fn init_tracing(lvl: LogLevel, log_file: Option<&Path>, json: bool) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::default().add_directive(to_level_filter(lvl).into());
    let ansi = atty::is(atty::Stream::Stderr);

    let (file_layer, guard) = match log_file.map(|p| (p, maybe_open_non_blocking_writer(p))) {
        Some((_, Some((writer, guard)))) => (Some(fmt_layer(json, false, writer)), Some(guard)),
        Some((path, None)) => {
            if let Some(def) = default_log_path().filter(|def| def != path) {
                out::print_info(&format!(
                    "You can try using the default log path instead: {}",
                    def.display()
                ));
            }
            (None, None)
        }
        None => (None, None),
    };

    registry()
        .with(env_filter)
        .with(fmt_layer(json, ansi, std::io::stderr))
        .with(file_layer)
        .try_init()?;
    Ok(guard)
}
