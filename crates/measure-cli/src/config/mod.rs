//! Configuration system for bundle-analyzer with multi-source loading.
//!
//! Merges settings from defaults, the config file, environment variables and
//! CLI flags, then validates the result into core [`ProjectConfig`] values.
//! Priority: CLI > Environment > File > Defaults
//!
//! [`ProjectConfig`]: measure_core::ProjectConfig

mod defaults;
mod loading;
mod template;
mod types;
mod validation;

pub use defaults::*;
pub use loading::{CliOverrides, ENV_PREFIX};
pub use template::{ConfigFormat, json_template, toml_template};
pub use types::*;
pub use validation::{ResolvedConfig, filter_projects};
