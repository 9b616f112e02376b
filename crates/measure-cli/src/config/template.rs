use std::path::Path;

/// On-disk config syntax, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }

    /// Starter file contents for `init`.
    pub fn template(self) -> &'static str {
        match self {
            ConfigFormat::Toml => toml_template(),
            ConfigFormat::Json => json_template(),
        }
    }
}

const TOML_TEMPLATE: &str = r#"# bundle-analyzer configuration
#
# Each [[projects]] entry is built with its bundler's analysis plugin enabled.
# The build command runs through the shell inside the project directory with
# ANALYZE=true and ANALYZE_OUTPUT=<stats file> added to its environment.
# Relative paths are resolved against the directory bundle-analyzer runs in.

# Flat CSV report. The hierarchy report goes next to it with a -tree suffix.
outputPath = "./bundle-analysis.csv"

# Builds in flight at once (default: number of CPUs).
# concurrency = 4

# "batched" waits for every build in a batch before starting the next batch.
# "streaming" starts another build as soon as any build finishes.
# schedule = "batched"

# Kill builds that run longer than this many seconds (default: no limit).
# buildTimeoutSecs = 600

# Where stats files are collected. Wiped at the start of every run.
# scratchDir = "/tmp/bundle-analyzer"

[[projects]]
name = "example-vite-app"
path = "/absolute/path/to/your/vite-project"
# "vite" reads rollup-plugin-visualizer JSON, "nextjs" reads
# webpack-bundle-analyzer JSON.
type = "vite"
buildCommand = "bun run build"

[[projects]]
name = "example-nextjs-app"
path = "/absolute/path/to/your/nextjs-project"
type = "nextjs"
buildCommand = "bun run build"
"#;

const JSON_TEMPLATE: &str = r#"{
  "projects": [
    {
      "name": "example-vite-app",
      "path": "/absolute/path/to/your/vite-project",
      "type": "vite",
      "buildCommand": "bun run build"
    },
    {
      "name": "example-nextjs-app",
      "path": "/absolute/path/to/your/nextjs-project",
      "type": "nextjs",
      "buildCommand": "bun run build"
    }
  ],
  "outputPath": "./bundle-analysis.csv"
}
"#;

pub fn toml_template() -> &'static str {
    TOML_TEMPLATE
}

pub fn json_template() -> &'static str {
    JSON_TEMPLATE
}
