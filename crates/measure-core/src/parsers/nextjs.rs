//! webpack-bundle-analyzer JSON (`analyzerMode: "json"`), as emitted by
//! `@next/bundle-analyzer`.
//!
//! The artifact is an array of chunks. Each chunk holds a tree of groups;
//! only groups carrying both an `id` and a `parsedSize` are modules.

use super::{StatsParser, parse_stats, percent, percent_of_chunk, read_stats};
use crate::model::{BundleData, BundlerFamily, ModuleData};
use crate::module_name::{extract_module_name, is_node_module};
use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;

const MISSING_HINT: &str =
    "Make sure webpack-bundle-analyzer is configured correctly in your Next.js config.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebpackChunk {
    #[serde(default)]
    label: String,
    #[serde(default)]
    parsed_size: Option<u64>,
    #[serde(default)]
    groups: Vec<WebpackGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebpackGroup {
    #[serde(default)]
    label: String,
    #[serde(default)]
    path: Option<String>,
    /// Numeric for production builds, string for named module ids.
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    parsed_size: Option<u64>,
    #[serde(default)]
    gzip_size: Option<u64>,
    #[serde(default)]
    groups: Vec<WebpackGroup>,
}

impl WebpackGroup {
    fn is_module(&self) -> bool {
        matches!(&self.id, Some(id) if !id.is_null()) && self.parsed_size.is_some()
    }
}

/// Parser for the nested-group format (`type = "nextjs"`).
#[derive(Debug, Clone, Copy, Default)]
pub struct NextjsStatsParser;

impl NextjsStatsParser {
    /// Parse in-memory stats content.
    pub fn parse_str(&self, project: &str, content: &str) -> Result<BundleData> {
        parse_content(project, Path::new("<inline>"), content)
    }
}

impl StatsParser for NextjsStatsParser {
    fn family(&self) -> BundlerFamily {
        BundlerFamily::Nextjs
    }

    fn parse(&self, project: &str, stats_path: &Path) -> Result<BundleData> {
        let value: serde_json::Value = read_stats(stats_path, MISSING_HINT)?;
        from_value(project, stats_path, value)
    }

    fn missing_hint(&self) -> &'static str {
        MISSING_HINT
    }
}

fn parse_content(project: &str, path: &Path, content: &str) -> Result<BundleData> {
    let value: serde_json::Value = parse_stats(path, content)?;
    from_value(project, path, value)
}

fn from_value(project: &str, path: &Path, value: serde_json::Value) -> Result<BundleData> {
    if !value.is_array() {
        return Err(Error::InvalidStats {
            path: path.to_path_buf(),
            reason: "Expected webpack-bundle-analyzer JSON output (an array of chunks).".to_string(),
        });
    }

    let chunks: Vec<WebpackChunk> =
        serde_json::from_value(value).map_err(|e| Error::InvalidStats {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    Ok(build_bundle(project, &chunks))
}

fn build_bundle(project: &str, chunks: &[WebpackChunk]) -> BundleData {
    let total_size: u64 = chunks.iter().map(|c| c.parsed_size.unwrap_or(0)).sum();

    let mut collector = Collector {
        project,
        total_size,
        modules: Vec::new(),
    };

    for chunk in chunks {
        let chunk_size = chunk.parsed_size.unwrap_or(0);
        let mut ancestors = Vec::new();
        for group in &chunk.groups {
            collector.visit(group, &chunk.label, chunk_size, &mut ancestors);
        }
    }

    // Zero size and zero modules always travel together.
    if collector.modules.is_empty() {
        if total_size > 0 {
            tracing::warn!(
                project,
                total_size,
                "stats list no modules; reporting an empty bundle"
            );
        }
        return BundleData::empty(project, BundlerFamily::Nextjs);
    }
    if total_size == 0 {
        tracing::warn!(
            project,
            modules = collector.modules.len(),
            "chunks report zero total size; discarding modules"
        );
        return BundleData::empty(project, BundlerFamily::Nextjs);
    }

    BundleData {
        project_name: project.to_string(),
        project_type: BundlerFamily::Nextjs,
        total_size,
        modules: collector.modules,
    }
}

struct Collector<'a> {
    project: &'a str,
    total_size: u64,
    modules: Vec<ModuleData>,
}

impl<'a> Collector<'a> {
    /// Pre-order descent; `ancestors` holds the labels above `group`.
    fn visit(
        &mut self,
        group: &'a WebpackGroup,
        chunk: &str,
        chunk_size: u64,
        ancestors: &mut Vec<&'a str>,
    ) {
        if group.is_module() {
            let module_path = match &group.path {
                Some(p) if !p.is_empty() => p.clone(),
                _ => {
                    let mut parts = ancestors.clone();
                    parts.push(&group.label);
                    parts.join("/")
                }
            };
            let size_raw = group.parsed_size.unwrap_or(0);

            self.modules.push(ModuleData {
                project: self.project.to_string(),
                project_type: BundlerFamily::Nextjs,
                chunk: chunk.to_string(),
                module_name: extract_module_name(&module_path),
                is_node_module: is_node_module(&module_path),
                module: module_path,
                size_raw,
                size_gzip: group.gzip_size.unwrap_or(0),
                size_brotli: 0,
                percent_of_chunk: percent_of_chunk(size_raw, chunk_size),
                percent_of_project: percent(size_raw, self.total_size),
            });
        }

        if group.groups.is_empty() {
            return;
        }

        ancestors.push(&group.label);
        for child in &group.groups {
            self.visit(child, chunk, chunk_size, ancestors);
        }
        ancestors.pop();
    }
}
