use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::ScheduleArg;
use crate::cli::validation::{parse_concurrency, parse_only, parse_timeout};

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a commented default configuration file and exit
    ///
    /// The file goes to --config when given, otherwise to
    /// ~/.bundle-analyzer/config.toml.
    Init(InitArgs),
}

/// Arguments for the init command
#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the analysis run
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// Comma-separated allow-list of project names
    ///
    /// Examples:
    ///   bundle-analyzer --only web
    ///   bundle-analyzer --only web,docs
    #[arg(long, value_name = "NAMES", value_parser = parse_only)]
    pub only: Option<::std::vec::Vec<String>>,

    /// Flat CSV output path (overrides outputPath in the config)
    ///
    /// The hierarchical report is written next to it with a -tree suffix.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Validate config and print planned builds without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Builds in flight at once (default: CPU count)
    #[arg(short = 'j', long, value_name = "N", value_parser = parse_concurrency)]
    pub concurrency: Option<usize>,

    /// Scheduling policy for builds
    ///
    /// - batched: run in batches of --concurrency, each batch finishing before the next
    /// - streaming: start the next build as soon as any finishes
    #[arg(long, value_enum, value_name = "MODE")]
    pub schedule: Option<ScheduleArg>,

    /// Per-build timeout in seconds (default: none)
    #[arg(long, value_name = "SECS", value_parser = parse_timeout)]
    pub timeout: Option<u64>,
}
