//! Error handling for the bundle-analyzer CLI.
//!
//! `CliError` is the top-level type returned by commands. Configuration
//! problems carry their own [`ConfigError`] with a hint for the user;
//! failures from the measurement core arrive as [`CliError::Analysis`].
//!
//! # Example
//!
//! ```rust,no_run
//! use measure_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_template(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .context(format!("Failed to read {}", path.display()))
//!         .with_hint("Run 'bundle-analyzer init' to create it")
//! }
//! ```

mod miette;

pub use self::miette::cli_error_to_miette;

use measure_core::ReportError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (file not found, invalid fields, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors from the measurement core (scratch setup, report writing)
    #[error(transparent)]
    Analysis(#[from] measure_core::Error),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

impl From<ReportError> for CliError {
    fn from(err: ReportError) -> Self {
        CliError::Analysis(measure_core::Error::Report(err))
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file doesn't exist at the expected location
    #[error("Config file not found: {}\n\nHint: Run 'bundle-analyzer init' to create one, or pass --config <path>", .0.display())]
    NotFound(PathBuf),

    /// Config file could not be parsed or has wrongly typed fields
    #[error("Failed to parse config file {}: {message}\n\nHint: Check the file syntax and field types", .path.display())]
    Parse { path: PathBuf, message: String },

    /// Missing required configuration field
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField { field: String, hint: String },

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        field: String,
        value: String,
        hint: String,
    },

    /// The project list is empty
    #[error("No projects configured\n\nHint: Add at least one [[projects]] entry to the config file")]
    EmptyProjects,

    /// Two projects share a name
    #[error("Duplicate project name: '{0}'\n\nHint: Project names must be unique")]
    DuplicateProject(String),

    /// `--only` matched nothing
    #[error("No projects matched the --only filter: {}", .0.join(", "))]
    NoMatch(Vec<String>),

    /// `init` target exists and `--force` was not given
    #[error("Config file already exists: {}\n\nHint: Pass --force to overwrite it", .0.display())]
    AlreadyExists(PathBuf),

    /// The default config location needs a home directory
    #[error("Could not determine the home directory\n\nHint: Pass --config <path> explicitly")]
    NoHomeDir,

    /// I/O error while reading or writing config
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Append a hint to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}
