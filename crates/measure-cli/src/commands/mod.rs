//! Command implementations for the bundle-analyzer CLI.
//!
//! - [`analyze`] - build every configured project and write the reports
//! - [`init`] - write a starter configuration file
//!
//! Commands return a [`RunStatus`] that `main` turns into the exit code.

pub mod analyze;
pub mod init;

use crate::cli::{Cli, Command};
use crate::error::Result;
use std::process::ExitCode;

/// At least one project failed, or nothing could be reported.
pub const EXIT_PARTIAL_FAILURE: u8 = 2;

/// Ctrl-C during a run.
pub const EXIT_INTERRUPTED: u8 = 130;

/// Outcome of a command that did not hit a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    PartialFailure,
}

impl RunStatus {
    pub fn exit_code(self) -> ExitCode {
        match self {
            RunStatus::Success => ExitCode::SUCCESS,
            RunStatus::PartialFailure => ExitCode::from(EXIT_PARTIAL_FAILURE),
        }
    }
}

/// Dispatch the parsed command line.
pub async fn execute(cli: Cli) -> Result<RunStatus> {
    match &cli.command {
        Some(Command::Init(args)) => {
            init::execute(cli.config.as_deref(), args)?;
            Ok(RunStatus::Success)
        }
        None => analyze::execute(cli.config.as_deref(), &cli.analyze).await,
    }
}
