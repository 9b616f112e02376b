//! bundle-analyzer entry point.
//!
//! Parses arguments, initializes logging, then races the selected command
//! against Ctrl-C. An interrupt drops the running builds (their children
//! are killed) and exits without writing reports.

use clap::Parser;
use measure_cli::{cli, commands, error, logger, ui};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);
    ui::set_quiet(args.quiet);

    let result = tokio::select! {
        result = commands::execute(args) => result,
        _ = tokio::signal::ctrl_c() => {
            ui::warning("Interrupted; no reports were written");
            return ExitCode::from(commands::EXIT_INTERRUPTED);
        }
    };

    match result {
        Ok(status) => status.exit_code(),
        Err(err) => {
            eprintln!("{:?}", error::cli_error_to_miette(err));
            ExitCode::FAILURE
        }
    }
}
