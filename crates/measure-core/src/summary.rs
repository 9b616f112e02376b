//! Run summary data for console rendering.

use crate::model::{BuildResult, BundlerFamily, ModuleData};
use serde::Serialize;

/// Largest modules listed per project.
pub const TOP_MODULES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub name: String,
    pub project_type: BundlerFamily,
    pub total_size: u64,
    pub module_count: usize,
    pub third_party_count: usize,
    pub project_file_count: usize,
    pub largest: Vec<ModuleData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedProject {
    pub name: String,
    pub reason: String,
}

/// Aggregate outcome of one orchestrator run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: Vec<FailedProject>,
    /// Successful projects that produced bundle data, in run order.
    pub projects: Vec<ProjectSummary>,
}

impl RunSummary {
    pub fn from_results(results: &[BuildResult]) -> Self {
        let mut summary = RunSummary {
            succeeded: 0,
            failed: Vec::new(),
            projects: Vec::new(),
        };

        for result in results {
            if !result.is_success() {
                summary.failed.push(FailedProject {
                    name: result.project_name().to_string(),
                    reason: result.error().unwrap_or("unknown error").to_string(),
                });
                continue;
            }

            summary.succeeded += 1;
            if let Some(bundle) = result.bundle_data() {
                summary.projects.push(ProjectSummary {
                    name: bundle.project_name.clone(),
                    project_type: bundle.project_type,
                    total_size: bundle.total_size,
                    module_count: bundle.modules.len(),
                    third_party_count: bundle.third_party_count(),
                    project_file_count: bundle.project_file_count(),
                    largest: bundle
                        .largest_modules(TOP_MODULES)
                        .into_iter()
                        .cloned()
                        .collect(),
                });
            }
        }

        summary
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}
