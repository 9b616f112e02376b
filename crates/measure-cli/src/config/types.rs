use measure_core::Schedule;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::defaults::default_output_path;

/// One `[[projects]]` entry as written in the config file.
///
/// Every field is optional here so that a missing key is reported with the
/// project's name instead of a generic parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Bundler family tag (`vite` or `nextjs`)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,

    /// Shell command that builds the project with its analysis plugin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_command: Option<String>,
}

/// bundle-analyzer configuration, as extracted from all sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerConfig {
    /// Projects to build, in report order
    #[serde(default)]
    pub projects: Vec<RawProject>,

    /// Flat CSV path; the hierarchy CSV is derived from it
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Builds in flight at once (default: CPU count)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,

    /// Per-build timeout; unset waits indefinitely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_timeout_secs: Option<u64>,

    /// Directory receiving `<project>-stats.json` files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            projects: Vec::new(),
            output_path: default_output_path(),
            concurrency: None,
            schedule: None,
            build_timeout_secs: None,
            scratch_dir: None,
        }
    }
}
