//! Command-line interface definition for bundle-analyzer.
//!
//! Running without a subcommand performs the analysis.
//!
//! - `bundle-analyzer [OPTIONS]` - build every configured project and write reports
//! - `bundle-analyzer init` - write a commented default configuration file

mod commands;
pub mod enums;
mod validation;

use clap::Parser;
use std::path::PathBuf;

pub use commands::{AnalyzeArgs, Command, InitArgs};
pub use enums::*;
pub use validation::{parse_concurrency, parse_only};

/// bundle-analyzer - measure JavaScript bundle sizes across projects
#[derive(Parser, Debug)]
#[command(
    name = "bundle-analyzer",
    version,
    about = "Measure JavaScript bundle sizes across many projects",
    long_about = "Builds every configured project with its bundler's analysis plugin enabled,\n\
                  normalizes the stats into one module-size model and writes a flat CSV\n\
                  plus a hierarchical CSV (project / package / module)."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Config file (default: ~/.bundle-analyzer/config.toml)
    ///
    /// Files ending in .json are read as JSON, anything else as TOML.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub analyze: AnalyzeArgs,

    /// Subcommand to execute (analysis runs when omitted)
    #[command(subcommand)]
    pub command: Option<Command>,
}
