//! Analysis run: load config, build projects, write reports.

use crate::cli::AnalyzeArgs;
use crate::commands::RunStatus;
use crate::config::{
    AnalyzerConfig, CliOverrides, ResolvedConfig, config_path_or_default, filter_projects,
};
use crate::error::{Result, ResultExt};
use crate::ui::{self, BuildProgress};
use measure_core::report::write_reports;
use measure_core::{
    BuildResult, BundleData, Orchestrator, OrchestratorOptions, ProjectConfig, ReportError,
    RunSummary,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

pub async fn execute(config_path: Option<&Path>, args: &AnalyzeArgs) -> Result<RunStatus> {
    let path = config_path_or_default(config_path)?;
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;

    let resolved = AnalyzerConfig::load(&path, &CliOverrides::from(args))?.validate(&cwd)?;
    for (name, dir) in &resolved.missing_dirs {
        ui::warning(&format!("Project path does not exist: {} ({})", dir.display(), name));
    }

    let projects = filter_projects(resolved.projects.clone(), args.only.as_deref())?;
    announce(&projects);

    let options = orchestrator_options(&resolved, args.dry_run);

    if options.dry_run {
        return dry_run(options, &projects).await;
    }

    let progress = Arc::new(BuildProgress::new(projects.len() as u64));
    let orchestrator = Orchestrator::new(options).with_reporter(progress.clone());

    let started = Instant::now();
    let results = orchestrator.run(&projects).await?;
    progress.finish();

    let summary = RunSummary::from_results(&results);
    let bundles: Vec<BundleData> = results
        .into_iter()
        .filter_map(BuildResult::into_bundle_data)
        .collect();

    let reports = match write_reports(&bundles, &resolved.output_path) {
        Ok(paths) => Some(paths),
        Err(ReportError::NoBundles) => {
            ui::error("No successful builds to report");
            None
        }
        Err(e) => return Err(e.into()),
    };

    ui::print_run_summary(&summary, reports.as_ref(), started.elapsed());

    Ok(status_for(&summary, reports.is_some()))
}

fn announce(projects: &[ProjectConfig]) {
    ui::info(&format!("Loaded config with {} project(s)", projects.len()));
    for project in projects {
        tracing::debug!(
            project = %project.name,
            family = %project.family,
            path = %project.path.display(),
            "configured project"
        );
    }
}

async fn dry_run(options: OrchestratorOptions, projects: &[ProjectConfig]) -> Result<RunStatus> {
    let orchestrator = Orchestrator::new(options);

    ui::info("Dry run: no builds will be executed");
    ui::print_dry_run_plan(projects, &orchestrator.scratch());

    let results = orchestrator.run(projects).await?;
    tracing::debug!(planned = results.len(), "dry run finished");

    ui::success("Dry run completed. Run without --dry-run to execute builds.");
    Ok(RunStatus::Success)
}

pub(crate) fn orchestrator_options(resolved: &ResolvedConfig, dry_run: bool) -> OrchestratorOptions {
    let defaults = OrchestratorOptions::default();
    OrchestratorOptions {
        dry_run,
        concurrency: resolved.concurrency.unwrap_or(defaults.concurrency),
        schedule: resolved.schedule,
        build_timeout: resolved.build_timeout,
        scratch_dir: resolved
            .scratch_dir
            .clone()
            .unwrap_or(defaults.scratch_dir),
    }
}

fn status_for(summary: &RunSummary, reported: bool) -> RunStatus {
    if reported && !summary.has_failures() {
        RunStatus::Success
    } else {
        RunStatus::PartialFailure
    }
}
