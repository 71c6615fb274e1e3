//! vizdoc CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use vizdoc::VizdocError;
use vizdoc_cli::{Args, error_adapter::ErrorAdapter};

/// Parses `--log-level`, falling back to `warn` for unknown names.
fn log_level(requested: &str) -> LevelFilter {
    LevelFilter::from_str(requested).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {requested}. Using 'warn' instead.");
        LevelFilter::Warn
    })
}

/// Renders the failure as a graphical miette report through the logger.
fn report(err: &VizdocError) {
    let reporter = miette::GraphicalReportHandler::new();

    let mut writer = String::new();
    reporter
        .render_report(&mut writer, &ErrorAdapter(err))
        .expect("Writing to String buffer is infallible");

    error!("{writer}");
}

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    // Arguments come first, they carry the log level
    let args = Args::parse();

    let log_level = log_level(&args.log_level);
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting vizdoc");
    debug!(args:?; "Parsed arguments");

    // Render the input, or report why nothing was written
    if let Err(err) = vizdoc_cli::run(&args) {
        report(&err);
        process::exit(1);
    }

    info!(output = args.output; "Completed successfully");
}
