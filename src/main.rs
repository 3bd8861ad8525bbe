use std::process::ExitCode;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = restore_merge::cli::parse();
    app::run(args)
}
