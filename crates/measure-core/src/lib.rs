//! # measure-core
//!
//! Bundle-size measurement core for multi-project JavaScript workspaces.
//!
//! This crate drives one build per configured project, reads the analysis
//! artifact each bundler plugin emits, normalizes it into a single
//! [`ModuleData`] model and renders two CSV reports from the result.
//!
//! ## Quick Start
//!
//! ```no_run
//! use measure_core::{BundlerFamily, Orchestrator, OrchestratorOptions, ProjectConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let projects = vec![ProjectConfig::new(
//!     "web",
//!     "/work/web",
//!     BundlerFamily::Vite,
//!     "npm run build",
//! )];
//!
//! let results = Orchestrator::new(OrchestratorOptions::default())
//!     .run(&projects)
//!     .await?;
//!
//! let bundles: Vec<_> = results.iter().filter_map(|r| r.bundle_data()).cloned().collect();
//! let paths = measure_core::report::write_reports(&bundles, "bundle-analysis.csv")?;
//! println!("wrote {}", paths.tree.display());
//! # Ok(()) }
//! ```
//!
//! ## Modules
//!
//! - [`model`] - projects, modules, bundles and build results
//! - [`module_name`] - short-name and third-party derivation
//! - [`parsers`] - one adapter per supported stats format
//! - [`orchestrator`] - bounded-parallel build execution
//! - [`report`] - flat and hierarchical CSV reports
//! - [`summary`] - console summary data

pub mod model;
pub mod module_name;
pub mod orchestrator;
pub mod parsers;
pub mod report;
pub mod summary;

pub use model::{BuildResult, BundleData, BundlerFamily, ModuleData, ProjectConfig};
pub use orchestrator::{BuildReporter, Orchestrator, OrchestratorOptions, Schedule, ScratchDir};
pub use parsers::{NextjsStatsParser, ParserRegistry, StatsParser, ViteStatsParser};
pub use report::{ReportError, ReportPaths};
pub use summary::RunSummary;

use std::path::PathBuf;
use std::time::Duration;

/// Error types for measurement operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Stats artifact was not produced where expected.
    #[error("Stats file not found: {}\n{hint}", .path.display())]
    StatsNotFound { path: PathBuf, hint: String },

    /// Stats artifact is valid JSON but not the expected shape.
    #[error("Invalid stats file format: {}\n{reason}", .path.display())]
    InvalidStats { path: PathBuf, reason: String },

    /// Stats artifact is not valid JSON.
    #[error("Malformed JSON in stats file {}: {source}", .path.display())]
    MalformedJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// I/O error with the path that caused it.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Build command exited with a non-zero status.
    #[error("Build failed with exit code {}\n{stderr}", .code.map_or_else(|| "unknown (terminated by signal)".to_string(), |c| c.to_string()))]
    BuildFailed { code: Option<i32>, stderr: String },

    /// Build command could not be started.
    #[error("Failed to spawn build command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Build exceeded the configured per-build timeout.
    #[error("Build timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// No parser is registered for the project's bundler family.
    #[error("Unknown project type: {0}")]
    UnknownProjectType(String),

    /// The blocking task parsing a stats file panicked or was cancelled.
    #[error("Stats parsing task failed: {0}")]
    ParseTask(#[source] tokio::task::JoinError),

    /// Report generation failed.
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Result type alias for measurement operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::StatsNotFound { .. } => "STATS_NOT_FOUND",
            Error::InvalidStats { .. } => "INVALID_STATS",
            Error::MalformedJson { .. } => "MALFORMED_JSON",
            Error::Io { .. } => "IO_ERROR",
            Error::BuildFailed { .. } => "BUILD_FAILED",
            Error::Spawn { .. } => "SPAWN_FAILED",
            Error::Timeout(_) => "BUILD_TIMEOUT",
            Error::UnknownProjectType(_) => "UNKNOWN_PROJECT_TYPE",
            Error::ParseTask(_) => "PARSE_TASK_FAILED",
            Error::Report(_) => "REPORT_ERROR",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::Spawn { .. } => Some(Box::new(
                "Check that the project path exists and the build command is installed.",
            )),
            Error::Timeout(_) => Some(Box::new(
                "Increase the timeout with --timeout or buildTimeoutSecs in the config file.",
            )),
            Error::UnknownProjectType(_) => Some(Box::new("Supported project types: vite, nextjs")),
            Error::Report(ReportError::NoBundles) => Some(Box::new(
                "Every build failed. Fix the failures listed above and re-run.",
            )),
            _ => None,
        }
    }
}
