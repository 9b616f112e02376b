//! bundle-analyzer CLI - measure bundle sizes across many JavaScript projects.
//!
//! This crate provides the command-line interface over `measure-core`: it
//! loads the project list, drives the build orchestrator with terminal
//! progress, writes the CSV reports and prints a run summary.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`config`] - layered configuration loading and validation
//! - [`commands`] - `analyze` (default) and `init`
//! - [`error`] - error types with actionable hints
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status lines, progress spinners and the summary table
//!
//! # Example
//!
//! ```rust
//! use measure_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, Result, ResultExt};
