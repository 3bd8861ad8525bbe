use owo_colors::OwoColorize;

use crate::result::MergeResult;

/// User-facing printing with consistent prefixes. Colors only when the stream is a TTY.
fn stdout_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn stderr_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Plain line without prefix; one per moved item so scripts can consume it.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// Human summary of a merge result.
pub fn print_result_text(result: &MergeResult) {
    if result.is_ok() {
        print_success(&result.message);
        for item in result.moved_items.iter().flatten() {
            print_user(item);
        }
        print_info(&format!(
            "{} items in {:.2}s",
            result.moved_items_count.unwrap_or_default(),
            result.execution_time_seconds
        ));
    } else {
        print_error(&result.message);
        for item in result.moved_items.iter().flatten() {
            print_info(&format!("already moved: {item}"));
        }
        for failed in result.failed_items.iter().flatten() {
            print_warn(&format!("{}: {}", failed.name, failed.error));
        }
    }
}
