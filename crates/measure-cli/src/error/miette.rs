//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        // Core errors carry their own code and help text.
        CliError::Analysis(e) => Report::new(e),
        CliError::Config(e) => miette::miette!(
            code = "CONFIG_ERROR",
            "Configuration error: {}",
            e
        ),
        _ => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use miette::Diagnostic;

    #[test]
    fn analysis_errors_keep_diagnostic_code() {
        let report = cli_error_to_miette(CliError::Analysis(
            measure_core::Error::UnknownProjectType("parcel".to_string()),
        ));
        let code = report.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("UNKNOWN_PROJECT_TYPE"));
    }

    #[test]
    fn config_errors_are_prefixed() {
        let report = cli_error_to_miette(ConfigError::EmptyProjects.into());
        assert!(report.to_string().starts_with("Configuration error:"));
    }
}
