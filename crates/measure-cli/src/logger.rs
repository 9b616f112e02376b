//! Logging setup for the bundle-analyzer CLI.
//!
//! Build lifecycle events from `measure-core` are emitted through `tracing`,
//! with each build wrapped in a `build` span carrying the project name. This
//! module installs the subscriber that renders them.
//!
//! ```rust,no_run
//! use measure_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!(project = "web", "build started");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "measure_core=debug,measure_cli=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "measure_core=info,measure_cli=info";

/// Install the global tracing subscriber.
///
/// Level selection, in order:
/// 1. `--verbose`: debug for this workspace's crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`, when set and valid
/// 4. info for this workspace's crates
///
/// Logs go to stderr so they never mix with piped output.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = select_filter(verbose, quiet);

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // A second initialization (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn select_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}
