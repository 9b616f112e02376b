//! Init command implementation.
//!
//! Writes a starter configuration to `--config` or the default location.

use crate::cli::InitArgs;
use crate::config::{ConfigFormat, config_path_or_default};
use crate::error::{CliError, ConfigError, Result, ResultExt};
use crate::ui;
use std::fs;
use std::path::Path;

const WRITE_HINT: &str = "Pass --config <path> to write the template elsewhere";

/// Write the template matching the target's extension.
///
/// An existing file is only replaced with `--force`.
pub fn execute(config_path: Option<&Path>, args: &InitArgs) -> Result<()> {
    let path = config_path_or_default(config_path)?;

    if path.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "config path is a directory: {}",
            path.display()
        )));
    }

    if path.exists() && !args.force {
        return Err(ConfigError::AlreadyExists(path).into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .context(format!("Failed to create {}", parent.display()))
            .with_hint(WRITE_HINT)?;
    }

    let format = ConfigFormat::from_path(&path);
    fs::write(&path, format.template())
        .context(format!("Failed to write {}", path.display()))
        .with_hint(WRITE_HINT)?;
    tracing::debug!(path = %path.display(), ?format, "wrote config template");

    ui::success(&format!("Created default config at: {}", path.display()));
    ui::info("Edit this file to configure your projects, then run: bundle-analyzer");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/config.toml");

        execute(Some(&path), &InitArgs::default()).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# bundle-analyzer configuration"));
    }

    #[test]
    fn test_init_writes_json_for_json_target() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");

        execute(Some(&path), &InitArgs::default()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["projects"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "keep me").unwrap();

        let err = execute(Some(&path), &InitArgs::default()).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::AlreadyExists(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[test]
    fn test_init_force_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "old").unwrap();

        execute(Some(&path), &InitArgs { force: true }).unwrap();
        assert_ne!(fs::read_to_string(&path).unwrap(), "old");
    }

    #[test]
    fn test_init_rejects_directory_target() {
        let temp = TempDir::new().unwrap();

        let err = execute(Some(temp.path()), &InitArgs { force: true }).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
        assert!(err.to_string().contains("is a directory"));
        assert!(temp.path().is_dir());
    }

    #[test]
    fn test_init_write_failure_carries_hint() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("config.toml");

        let err = execute(Some(&path), &InitArgs::default()).unwrap_err();
        assert!(err.to_string().contains("Hint:"), "{err}");
    }
}
