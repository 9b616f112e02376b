//! Severity-prefixed status lines on stderr.

use super::{is_quiet, paint};
use owo_colors::Style;

/// Print a success message to stderr.
pub fn success(message: &str) {
    if !is_quiet() {
        eprintln!("{} {}", paint("✓", Style::new().green().bold()), message);
    }
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    if !is_quiet() {
        eprintln!("{} {}", paint("ℹ", Style::new().blue().bold()), message);
    }
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    if !is_quiet() {
        eprintln!(
            "{} {}",
            paint("⚠", Style::new().yellow().bold()),
            paint(message, Style::new().yellow())
        );
    }
}

/// Print an error message to stderr. Shown even with `--quiet`.
pub fn error(message: &str) {
    eprintln!(
        "{} {}",
        paint("✗", Style::new().red().bold()),
        paint(message, Style::new().red())
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        // These should not panic
        success("Success message");
        info("Info message");
        warning("Warning message");
        error("Error message");
    }
}
