//! Canonical module-size model shared by every parser and report.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Bundler tool family, selecting which stats parser applies to a project.
///
/// - `nextjs`: webpack-bundle-analyzer JSON (array of nested chunk groups)
/// - `vite`: rollup-plugin-visualizer JSON (tree plus node side tables)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundlerFamily {
    Nextjs,
    Vite,
}

impl BundlerFamily {
    /// All supported families, in tag order.
    pub const ALL: [BundlerFamily; 2] = [BundlerFamily::Nextjs, BundlerFamily::Vite];

    /// The configuration tag for this family.
    pub fn as_str(&self) -> &'static str {
        match self {
            BundlerFamily::Nextjs => "nextjs",
            BundlerFamily::Vite => "vite",
        }
    }

    /// Where the family's analyzer plugin writes stats when it ignores
    /// `ANALYZE_OUTPUT`.
    pub fn conventional_stats_path(&self, project_dir: &Path) -> PathBuf {
        match self {
            BundlerFamily::Nextjs => project_dir.join(".next").join("analyze").join("client.json"),
            BundlerFamily::Vite => project_dir.join("stats.json"),
        }
    }
}

impl fmt::Display for BundlerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BundlerFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nextjs" => Ok(BundlerFamily::Nextjs),
            "vite" => Ok(BundlerFamily::Vite),
            other => Err(format!(
                "invalid project type '{}'. Must be 'vite' or 'nextjs'",
                other
            )),
        }
    }
}

/// Identity and build recipe for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub name: String,
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub family: BundlerFamily,
    pub build_command: String,
}

impl ProjectConfig {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        family: BundlerFamily,
        build_command: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            family,
            build_command: build_command.into(),
        }
    }
}

/// One leaf unit of bundled code.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleData {
    pub project: String,
    pub project_type: BundlerFamily,
    pub chunk: String,
    pub module: String,
    pub module_name: String,
    pub is_node_module: bool,
    pub size_raw: u64,
    pub size_gzip: u64,
    /// Zero when the source format does not report brotli sizes.
    pub size_brotli: u64,
    pub percent_of_chunk: f64,
    pub percent_of_project: f64,
}

/// Per-project aggregate of every module a build produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleData {
    pub project_name: String,
    pub project_type: BundlerFamily,
    /// Sum over top-level chunks, not over (possibly shared) modules.
    pub total_size: u64,
    pub modules: Vec<ModuleData>,
}

impl BundleData {
    /// A project that produced no modules. This is a valid state.
    pub fn empty(project_name: impl Into<String>, project_type: BundlerFamily) -> Self {
        Self {
            project_name: project_name.into(),
            project_type,
            total_size: 0,
            modules: Vec::new(),
        }
    }

    pub fn third_party_count(&self) -> usize {
        self.modules.iter().filter(|m| m.is_node_module).count()
    }

    pub fn project_file_count(&self) -> usize {
        self.modules.len() - self.third_party_count()
    }

    /// The `n` largest modules by raw size.
    pub fn largest_modules(&self, n: usize) -> Vec<&ModuleData> {
        let mut sorted: Vec<&ModuleData> = self.modules.iter().collect();
        sorted.sort_by(|a, b| b.size_raw.cmp(&a.size_raw));
        sorted.truncate(n);
        sorted
    }
}

/// Outcome of one project's build attempt. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildResult {
    project_name: String,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bundle_data: Option<BundleData>,
}

impl BuildResult {
    pub fn succeeded(project_name: impl Into<String>, bundle_data: Option<BundleData>) -> Self {
        Self {
            project_name: project_name.into(),
            success: true,
            error: None,
            bundle_data,
        }
    }

    pub fn failed(project_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            success: false,
            error: Some(error.into()),
            bundle_data: None,
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn bundle_data(&self) -> Option<&BundleData> {
        self.bundle_data.as_ref()
    }

    pub fn into_bundle_data(self) -> Option<BundleData> {
        self.bundle_data
    }
}
