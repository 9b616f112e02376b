use crate::cli::AnalyzeArgs;
use crate::config::AnalyzerConfig;
use crate::config::template::ConfigFormat;
use crate::error::ConfigError;
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml},
};
use measure_core::Schedule;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Prefix for environment overrides (`BUNDLE_ANALYZER_CONCURRENCY=4`).
pub const ENV_PREFIX: &str = "BUNDLE_ANALYZER_";

/// Environment key (after the prefix) to config key.
const ENV_KEYS: [(&str, &str); 5] = [
    ("output_path", "outputPath"),
    ("concurrency", "concurrency"),
    ("schedule", "schedule"),
    ("build_timeout_secs", "buildTimeoutSecs"),
    ("scratch_dir", "scratchDir"),
];

/// Values given on the command line. Unset flags leave lower layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_timeout_secs: Option<u64>,
}

impl From<&AnalyzeArgs> for CliOverrides {
    fn from(args: &AnalyzeArgs) -> Self {
        Self {
            output_path: args.output.clone(),
            concurrency: args.concurrency,
            schedule: args.schedule.map(Into::into),
            build_timeout_secs: args.timeout,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > config file > defaults
    ///
    /// The file must exist. `.json` files are read as JSON, anything else
    /// as TOML.
    pub fn load(path: &Path, overrides: &CliOverrides) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        figment = match ConfigFormat::from_path(path) {
            ConfigFormat::Json => figment.merge(Json::file(path)),
            ConfigFormat::Toml => figment.merge(Toml::file(path)),
        };

        tracing::debug!(path = %path.display(), "loading config file");

        figment = figment
            .merge(env_provider())
            .merge(Serialized::defaults(overrides));

        figment.extract().map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

fn env_provider() -> Env {
    // Keys are emitted in camelCase, so figment must not lowercase them.
    Env::prefixed(ENV_PREFIX)
        .filter_map(|key| {
            ENV_KEYS
                .iter()
                .find(|(env, _)| key.as_str().eq_ignore_ascii_case(env))
                .map(|(_, field)| (*field).into())
        })
        .lowercase(false)
}
