use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Directory under the home directory holding the default config.
pub const CONFIG_DIR_NAME: &str = ".bundle-analyzer";

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Used only when `config.toml` is absent.
pub const JSON_CONFIG_FILE_NAME: &str = "config.json";

pub fn default_output_path() -> PathBuf {
    PathBuf::from("./bundle-analysis.csv")
}

/// `~/.bundle-analyzer/config.toml`, or `config.json` beside it when only
/// the JSON file exists.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| config_file_in(&home.join(CONFIG_DIR_NAME)))
        .ok_or(ConfigError::NoHomeDir)
}

pub(crate) fn config_file_in(dir: &Path) -> PathBuf {
    let toml = dir.join(CONFIG_FILE_NAME);
    if toml.exists() {
        return toml;
    }
    let json = dir.join(JSON_CONFIG_FILE_NAME);
    if json.is_file() { json } else { toml }
}

/// The explicit `--config` path, or the default location.
pub fn config_path_or_default(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => default_config_path(),
    }
}
