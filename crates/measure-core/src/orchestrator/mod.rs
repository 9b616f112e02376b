//! Build orchestration.
//!
//! The [`Orchestrator`] runs each project's build command as a child
//! process, then hands the produced stats artifact to the parser registered
//! for the project's [`BundlerFamily`](crate::BundlerFamily). Build and
//! parse failures are contained per project: every input project yields
//! exactly one [`BuildResult`], returned in input order.
//!
//! Two scheduling policies are available:
//!
//! - [`Schedule::Batched`]: projects are split into batches of
//!   `concurrency`; a batch must finish completely before the next starts.
//! - [`Schedule::Streaming`]: a semaphore keeps up to `concurrency` builds
//!   in flight and starts the next one as soon as any finishes.

mod process;
mod schedule;
mod scratch;

pub use process::{ANALYZE_ENV, ANALYZE_OUTPUT_ENV};
pub use scratch::ScratchDir;

use crate::model::{BuildResult, BundleData, ProjectConfig};
use crate::parsers::ParserRegistry;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

/// How builds are admitted for execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schedule {
    #[default]
    Batched,
    Streaming,
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Schedule::Batched => "batched",
            Schedule::Streaming => "streaming",
        })
    }
}

impl FromStr for Schedule {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "batched" => Ok(Schedule::Batched),
            "streaming" => Ok(Schedule::Streaming),
            other => Err(format!(
                "invalid schedule '{}'. Must be 'batched' or 'streaming'",
                other
            )),
        }
    }
}

/// Options controlling a run.
#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    /// Report planned builds without executing anything.
    pub dry_run: bool,
    /// Builds in flight at once. Values below 1 are treated as 1.
    pub concurrency: usize,
    pub schedule: Schedule,
    /// Per-build limit. `None` waits indefinitely.
    pub build_timeout: Option<Duration>,
    pub scratch_dir: PathBuf,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            concurrency: num_cpus::get(),
            schedule: Schedule::default(),
            build_timeout: None,
            scratch_dir: ScratchDir::default_location(),
        }
    }
}

/// Receives per-project progress events from running builds.
///
/// Events arrive from build tasks, possibly concurrently.
pub trait BuildReporter: Send + Sync {
    fn build_started(&self, _project: &ProjectConfig) {}
    fn build_finished(&self, _project: &ProjectConfig, _result: &BuildResult) {}
}

struct SilentReporter;

impl BuildReporter for SilentReporter {}

/// Runs project builds and collects one [`BuildResult`] per project.
pub struct Orchestrator {
    options: OrchestratorOptions,
    registry: Arc<ParserRegistry>,
    reporter: Arc<dyn BuildReporter>,
}

impl Orchestrator {
    pub fn new(options: OrchestratorOptions) -> Self {
        Self {
            options,
            registry: Arc::new(ParserRegistry::default()),
            reporter: Arc::new(SilentReporter),
        }
    }

    /// Replace the parser dispatch table.
    pub fn with_registry(mut self, registry: ParserRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn BuildReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn options(&self) -> &OrchestratorOptions {
        &self.options
    }

    pub fn scratch(&self) -> ScratchDir {
        ScratchDir::new(&self.options.scratch_dir)
    }

    /// Build and measure every project.
    ///
    /// Only scratch directory setup can fail the run as a whole; build and
    /// parse errors become failed results.
    pub async fn run(&self, projects: &[ProjectConfig]) -> Result<Vec<BuildResult>> {
        let scratch = self.scratch();

        if self.options.dry_run {
            return Ok(projects
                .iter()
                .map(|project| {
                    tracing::info!(
                        project = %project.name,
                        command = %project.build_command,
                        cwd = %project.path.display(),
                        stats = %scratch.stats_path(&project.name).display(),
                        "dry run: would build"
                    );
                    BuildResult::succeeded(&project.name, None)
                })
                .collect());
        }

        scratch.prepare().await?;

        let jobs: Vec<BuildJob> = projects
            .iter()
            .enumerate()
            .map(|(index, project)| BuildJob {
                index,
                stats_path: scratch.stats_path(&project.name),
                project: project.clone(),
            })
            .collect();

        let ctx = Arc::new(JobContext {
            registry: Arc::clone(&self.registry),
            reporter: Arc::clone(&self.reporter),
            timeout: self.options.build_timeout,
        });

        let concurrency = self.options.concurrency.max(1);
        tracing::info!(
            projects = jobs.len(),
            concurrency,
            schedule = %self.options.schedule,
            "starting builds"
        );

        let finished = match self.options.schedule {
            Schedule::Batched => schedule::batched(ctx, jobs, concurrency).await,
            Schedule::Streaming => schedule::streaming(ctx, jobs, concurrency).await,
        };

        Ok(order_results(projects, finished))
    }
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("options", &self.options)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct BuildJob {
    pub(crate) index: usize,
    pub(crate) project: ProjectConfig,
    pub(crate) stats_path: PathBuf,
}

pub(crate) struct JobContext {
    registry: Arc<ParserRegistry>,
    reporter: Arc<dyn BuildReporter>,
    timeout: Option<Duration>,
}

/// One project's build and parse, with errors folded into the result.
pub(crate) async fn execute(ctx: Arc<JobContext>, job: BuildJob) -> (usize, BuildResult) {
    let span = tracing::info_span!("build", project = %job.project.name);

    async move {
        ctx.reporter.build_started(&job.project);
        tracing::info!("build started");

        let result = match build_and_parse(&ctx, &job).await {
            Ok(bundle) => {
                tracing::info!(
                    modules = bundle.modules.len(),
                    total_size = bundle.total_size,
                    "build measured"
                );
                BuildResult::succeeded(&job.project.name, Some(bundle))
            }
            Err(err) => {
                tracing::error!(error = %err, "build failed");
                BuildResult::failed(&job.project.name, err.to_string())
            }
        };

        ctx.reporter.build_finished(&job.project, &result);
        (job.index, result)
    }
    .instrument(span)
    .await
}

async fn build_and_parse(ctx: &JobContext, job: &BuildJob) -> Result<BundleData> {
    let before = process::conventional_snapshot(&job.project).await;
    process::run_build(&job.project, &job.stats_path, ctx.timeout).await?;

    // Stats files can be large; read and parse off the async workers.
    let registry = Arc::clone(&ctx.registry);
    let project = job.project.clone();
    let override_path = job.stats_path.clone();
    tokio::task::spawn_blocking(move || {
        let stats = process::locate_stats(&project, &override_path, before);
        registry.parse(project.family, &project.name, &stats)
    })
    .await
    .map_err(Error::ParseTask)?
}

/// Restore input order; a project whose task vanished gets a failed result.
fn order_results(projects: &[ProjectConfig], finished: Vec<(usize, BuildResult)>) -> Vec<BuildResult> {
    let mut slots: Vec<Option<BuildResult>> = vec![None; projects.len()];
    for (index, result) in finished {
        if let Some(slot) = slots.get_mut(index) {
            *slot = Some(result);
        }
    }
    slots
        .into_iter()
        .zip(projects)
        .map(|(slot, project)| {
            slot.unwrap_or_else(|| {
                BuildResult::failed(&project.name, "Build task terminated unexpectedly")
            })
        })
        .collect()
}
