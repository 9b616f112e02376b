//! Scheduling policies for bounded-parallel builds.

use super::{BuildJob, JobContext, execute};
use crate::model::BuildResult;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

/// Bulk-synchronous batches: every build of a batch finishes before the
/// next batch starts.
pub(super) async fn batched(
    ctx: Arc<JobContext>,
    jobs: Vec<BuildJob>,
    concurrency: usize,
) -> Vec<(usize, BuildResult)> {
    let mut results = Vec::with_capacity(jobs.len());

    for (batch_index, batch) in jobs.chunks(concurrency.max(1)).enumerate() {
        tracing::debug!(batch = batch_index + 1, size = batch.len(), "starting batch");

        let mut join_set = JoinSet::new();
        for job in batch.iter().cloned() {
            join_set.spawn(execute(Arc::clone(&ctx), job));
        }
        while let Some(joined) = join_set.join_next().await {
            collect(joined, &mut results);
        }
    }

    results
}

/// Continuously refilled pool bounded by a semaphore.
pub(super) async fn streaming(
    ctx: Arc<JobContext>,
    jobs: Vec<BuildJob>,
    concurrency: usize,
) -> Vec<(usize, BuildResult)> {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut join_set = JoinSet::new();

    for job in jobs.iter().cloned() {
        let ctx = Arc::clone(&ctx);
        let semaphore = Arc::clone(&semaphore);
        join_set.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    return (
                        job.index,
                        BuildResult::failed(job.project.name, "Build scheduler shut down"),
                    );
                }
            };
            execute(ctx, job).await
        });
    }

    let mut results = Vec::with_capacity(jobs.len());
    while let Some(joined) = join_set.join_next().await {
        collect(joined, &mut results);
    }
    results
}

fn collect(joined: Result<(usize, BuildResult), JoinError>, results: &mut Vec<(usize, BuildResult)>) {
    match joined {
        Ok(result) => results.push(result),
        // The orchestrator fills in a failed result for the missing index.
        Err(join_err) => tracing::error!(error = %join_err, "build task panicked"),
    }
}
