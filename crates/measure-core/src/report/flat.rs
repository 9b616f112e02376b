//! One row per module across every project.

use super::{ReportError, csv_writer};
use crate::model::{BundleData, ModuleData};
use serde::{Deserialize, Serialize};
use std::io::Write;

pub const FLAT_HEADER: [&str; 11] = [
    "project",
    "projectType",
    "chunk",
    "module",
    "moduleName",
    "isNodeModule",
    "sizeRaw",
    "sizeGzip",
    "sizeBrotli",
    "percentOfChunk",
    "percentOfProject",
];

/// A serialized flat-report record. Percentages carry two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatRow {
    pub project: String,
    pub project_type: String,
    pub chunk: String,
    pub module: String,
    pub module_name: String,
    pub is_node_module: bool,
    pub size_raw: u64,
    pub size_gzip: u64,
    pub size_brotli: u64,
    pub percent_of_chunk: String,
    pub percent_of_project: String,
}

impl From<&ModuleData> for FlatRow {
    fn from(m: &ModuleData) -> Self {
        Self {
            project: m.project.clone(),
            project_type: m.project_type.to_string(),
            chunk: m.chunk.clone(),
            module: m.module.clone(),
            module_name: m.module_name.clone(),
            is_node_module: m.is_node_module,
            size_raw: m.size_raw,
            size_gzip: m.size_gzip,
            size_brotli: m.size_brotli,
            percent_of_chunk: format!("{:.2}", m.percent_of_chunk),
            percent_of_project: format!("{:.2}", m.percent_of_project),
        }
    }
}

/// Modules ordered by project name, then raw size descending.
pub fn sorted_modules(bundles: &[BundleData]) -> Vec<&ModuleData> {
    let mut modules: Vec<&ModuleData> = bundles.iter().flat_map(|b| &b.modules).collect();
    modules.sort_by(|a, b| {
        a.project
            .cmp(&b.project)
            .then_with(|| b.size_raw.cmp(&a.size_raw))
    });
    modules
}

pub fn write_flat<W: Write>(bundles: &[BundleData], writer: W) -> Result<(), ReportError> {
    let mut csv = csv_writer(writer);
    csv.write_record(FLAT_HEADER)?;
    for module in sorted_modules(bundles) {
        csv.serialize(FlatRow::from(module))?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}
