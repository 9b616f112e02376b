//! Terminal UI for build progress, status messages and the run summary.
//!
//! Handles environment detection (CI, TTY, `NO_COLOR`) and degrades to
//! plain line output when terminal features aren't available.
//!
//! # Examples
//!
//! ```no_run
//! use measure_cli::ui;
//!
//! ui::init_colors(false);
//! ui::info("Loaded config with 2 project(s)");
//! ui::warning("Project path does not exist: /srv/web");
//! ui::error("No successful builds to report");
//! ```

mod format;
mod messages;
mod progress;

pub use format::{format_duration, format_percent, format_size, print_dry_run_plan, print_run_summary};
pub use messages::{error, info, success, warning};
pub use progress::BuildProgress;

use owo_colors::{OwoColorize, Style};
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};

static COLORS: AtomicBool = AtomicBool::new(true);
static QUIET: AtomicBool = AtomicBool::new(false);

/// Check if running in a CI environment.
///
/// Detects common CI environment variables from GitHub Actions, GitLab CI,
/// CircleCI, and Travis CI.
pub fn is_ci() -> bool {
    ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS"]
        .iter()
        .any(|var| std::env::var_os(var).is_some())
}

/// Check if color output should be enabled.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` enables them off a TTY, and
/// otherwise colors follow whether stderr is a terminal.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::user_attended_stderr()
}

/// Decide once whether styled output is used. `--no-color` always wins.
pub fn init_colors(no_color: bool) {
    COLORS.store(!no_color && should_use_color(), Ordering::Relaxed);
}

/// Suppress everything except errors.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub(crate) fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Render `text` with `style` when colors are enabled.
pub(crate) fn paint(text: impl Display, style: Style) -> String {
    if COLORS.load(Ordering::Relaxed) {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}
