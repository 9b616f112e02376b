//! rollup-plugin-visualizer JSON (`template: "raw-data"`, format version 2).
//!
//! The tree's top-level children are chunks. Sizes live in `nodeParts`,
//! keyed by the `uid` of a tree node; `nodeMetas` maps each module to the
//! part it contributes to every chunk it appears in. The side tables are
//! authoritative: a module may be attributed to a chunk under a part that
//! sits elsewhere in the tree.

use super::{StatsParser, parse_stats, percent, percent_of_chunk, read_stats};
use crate::model::{BundleData, BundlerFamily, ModuleData};
use crate::module_name::{extract_module_name, is_node_module};
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

const MISSING_HINT: &str =
    "Make sure rollup-plugin-visualizer is configured correctly in your Vite config.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VisualizerStats {
    #[serde(default)]
    version: Option<u32>,
    tree: VisualizerNode,
    node_parts: HashMap<String, NodePart>,
    #[serde(default)]
    node_metas: BTreeMap<String, NodeMeta>,
}

#[derive(Debug, Deserialize)]
struct VisualizerNode {
    #[serde(default)]
    name: String,
    #[serde(default)]
    uid: Option<String>,
    #[serde(default)]
    children: Vec<VisualizerNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodePart {
    #[serde(default)]
    rendered_length: u64,
    #[serde(default)]
    gzip_length: u64,
    #[serde(default)]
    brotli_length: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeMeta {
    id: String,
    /// Chunk name to part uid.
    #[serde(default)]
    module_parts: BTreeMap<String, String>,
}

/// Parser for the flat node-table format (`type = "vite"`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ViteStatsParser;

impl ViteStatsParser {
    /// Parse in-memory stats content.
    pub fn parse_str(&self, project: &str, content: &str) -> Result<BundleData> {
        let value: serde_json::Value = parse_stats(Path::new("<inline>"), content)?;
        from_value(project, Path::new("<inline>"), value)
    }
}

impl StatsParser for ViteStatsParser {
    fn family(&self) -> BundlerFamily {
        BundlerFamily::Vite
    }

    fn parse(&self, project: &str, stats_path: &Path) -> Result<BundleData> {
        let value: serde_json::Value = read_stats(stats_path, MISSING_HINT)?;
        from_value(project, stats_path, value)
    }

    fn missing_hint(&self) -> &'static str {
        MISSING_HINT
    }
}

fn from_value(project: &str, path: &Path, value: serde_json::Value) -> Result<BundleData> {
    let has_required_keys = value
        .as_object()
        .is_some_and(|obj| obj.contains_key("tree") && obj.contains_key("nodeParts"));
    if !has_required_keys {
        return Err(Error::InvalidStats {
            path: path.to_path_buf(),
            reason: "Expected rollup-plugin-visualizer JSON output with 'tree' and 'nodeParts'."
                .to_string(),
        });
    }

    let stats: VisualizerStats =
        serde_json::from_value(value).map_err(|e| Error::InvalidStats {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if let Some(version) = stats.version.filter(|v| *v != 2) {
        tracing::debug!(project, version, "unexpected rollup-plugin-visualizer format version");
    }

    Ok(build_bundle(project, &stats))
}

fn build_bundle(project: &str, stats: &VisualizerStats) -> BundleData {
    let chunk_sizes = chunk_sizes(stats);
    let total_size: u64 = chunk_sizes.values().sum();

    let mut modules = Vec::new();
    for meta in stats.node_metas.values() {
        let module_name = extract_module_name(&meta.id);
        let third_party = is_node_module(&meta.id);

        for (chunk, part_uid) in &meta.module_parts {
            let Some(part) = stats.node_parts.get(part_uid) else {
                continue;
            };
            let chunk_size = chunk_sizes.get(chunk.as_str()).copied().unwrap_or(0);

            modules.push(ModuleData {
                project: project.to_string(),
                project_type: BundlerFamily::Vite,
                chunk: chunk.clone(),
                module: meta.id.clone(),
                module_name: module_name.clone(),
                is_node_module: third_party,
                size_raw: part.rendered_length,
                size_gzip: part.gzip_length,
                size_brotli: part.brotli_length,
                percent_of_chunk: percent_of_chunk(part.rendered_length, chunk_size),
                percent_of_project: percent(part.rendered_length, total_size),
            });
        }
    }

    // Zero size and zero modules always travel together.
    if modules.is_empty() {
        if total_size > 0 {
            tracing::warn!(
                project,
                total_size,
                "stats list no modules; reporting an empty bundle"
            );
        }
        return BundleData::empty(project, BundlerFamily::Vite);
    }
    if total_size == 0 {
        tracing::warn!(
            project,
            modules = modules.len(),
            "chunks report zero total size; discarding modules"
        );
        return BundleData::empty(project, BundlerFamily::Vite);
    }

    BundleData {
        project_name: project.to_string(),
        project_type: BundlerFamily::Vite,
        total_size,
        modules,
    }
}

/// Rendered length of every sized tree node, summed per top-level chunk.
fn chunk_sizes(stats: &VisualizerStats) -> HashMap<&str, u64> {
    fn accumulate(node: &VisualizerNode, parts: &HashMap<String, NodePart>, total: &mut u64) {
        if let Some(part) = node.uid.as_ref().and_then(|uid| parts.get(uid)) {
            *total += part.rendered_length;
        }
        for child in &node.children {
            accumulate(child, parts, total);
        }
    }

    let mut sizes = HashMap::new();
    for chunk in &stats.tree.children {
        let entry = sizes.entry(chunk.name.as_str()).or_insert(0);
        accumulate(chunk, &stats.node_parts, entry);
    }
    sizes
}
