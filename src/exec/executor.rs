// src/exec/executor.rs

use std::collections::HashMap;

use anyhow::anyhow;
use tokio::task::{self, JoinError, JoinSet};
use tracing::{debug, error, info, warn};

use crate::config::ExecutorConfig;
use crate::dag::{ExecutionFrontier, JobGraph};
use crate::errors::Result;
use crate::job::{DependencyResults, Job, JobId, JobResult, JobValue};
use crate::report::SuiteResult;

use super::backend::{BlockingPoolBackend, ExecutorBackend};

/// Runs a [`JobGraph`] batch by batch.
///
/// Every job of a batch is submitted at once; the next batch is requested
/// only after the whole current batch has reported back. If any job of a
/// batch fails, the run stops after that batch and the jobs it never reached
/// are left out of the report.
#[derive(Debug, Default)]
pub struct JobExecutor<B = BlockingPoolBackend> {
    backend: B,
}

impl JobExecutor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: ExecutorBackend> JobExecutor<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run the graph to completion or to the first failing batch.
    ///
    /// Job failures never surface as an `Err`; they are recorded in the
    /// returned [`SuiteResult`].
    pub async fn run(&self, graph: JobGraph) -> SuiteResult {
        let mut frontier = ExecutionFrontier::new(graph);
        let total = frontier.total_job_count();
        let mut results: HashMap<JobId, JobResult> = HashMap::with_capacity(total);
        let mut batch_no = 0usize;

        info!(total_jobs = total, "job graph run started");

        while frontier.has_remaining() {
            let batch = match frontier.next_batch() {
                Ok(batch) => batch,
                Err(err) => {
                    error!(error = %err, "frontier refused a batch; stopping run");
                    break;
                }
            };
            batch_no += 1;

            let names: Vec<&str> = batch.iter().map(Job::name).collect();
            debug!(batch = batch_no, ?names, "submitting batch");

            let mut in_flight = JoinSet::new();
            let mut submitted: HashMap<task::Id, (Job, JobResult)> = HashMap::new();
            for job in batch {
                let deps = wire_dependencies(&frontier, &job, &results);
                let handle = self.backend.submit(job.clone(), deps);
                let waiter = in_flight.spawn(async move { handle.await });
                submitted.insert(waiter.id(), (job.clone(), JobResult::pending(job.name())));
            }

            let failures =
                collect_batch(batch_no, &mut in_flight, &mut submitted, &mut results).await;

            if failures > 0 {
                warn!(
                    batch = batch_no,
                    failures,
                    not_started = frontier.remaining_job_count(),
                    "batch had failures; stopping run"
                );
                break;
            }
        }

        let report = SuiteResult::new(results, total);
        info!(
            total_jobs = report.total_job_count(),
            succeeded = report.succeeded_count(),
            failed = report.failed_job_count(),
            batches = batch_no,
            "job graph run finished"
        );
        report
    }

    /// Provision a runtime from `config` and block on [`run`](Self::run).
    ///
    /// Must not be called from within an async context.
    pub fn run_blocking(&self, graph: JobGraph, config: &ExecutorConfig) -> Result<SuiteResult> {
        let runtime = config.build_runtime()?;
        Ok(runtime.block_on(self.run(graph)))
    }
}

type Waited = std::result::Result<anyhow::Result<JobValue>, JoinError>;

/// Join every task of a batch, recording one entry per submitted job.
/// Returns the number of jobs that did not succeed.
///
/// Collected in completion order; the batch is done only when all of its
/// jobs have reported.
async fn collect_batch(
    batch_no: usize,
    in_flight: &mut JoinSet<Waited>,
    submitted: &mut HashMap<task::Id, (Job, JobResult)>,
    results: &mut HashMap<JobId, JobResult>,
) -> usize {
    let mut failures = 0usize;
    while let Some(joined) = in_flight.join_next_with_id().await {
        let (task_id, outcome) = match joined {
            Ok((task_id, outcome)) => (task_id, Ok(outcome)),
            Err(err) => (err.id(), Err(err)),
        };
        let Some((job, slot)) = submitted.remove(&task_id) else {
            error!(batch = batch_no, "joined a task that was never submitted");
            failures += 1;
            continue;
        };

        let result = match outcome {
            Ok(job_outcome) => record_outcome(&job, slot, job_outcome),
            Err(err) => {
                let cause = join_failure(&job, err)
                    .context(format!("collecting the outcome of job '{job}'"));
                error!(
                    batch = batch_no,
                    job = %job,
                    error = %format!("{cause:#}"),
                    "lost track of a submitted job"
                );
                slot.failed(cause)
            }
        };
        if !result.is_successful() {
            failures += 1;
        }
        results.insert(job.id(), result);
    }
    failures
}

/// Results of `job`'s dependencies in declaration order.
///
/// Every dependency finished successfully in an earlier batch, otherwise the
/// run would have stopped before reaching `job`.
fn wire_dependencies(
    frontier: &ExecutionFrontier,
    job: &Job,
    results: &HashMap<JobId, JobResult>,
) -> DependencyResults {
    let wired = frontier
        .dependencies_of(&job.id())
        .iter()
        .map(|dep| match results.get(&dep.id()) {
            Some(result) => result.clone(),
            None => {
                warn!(job = %job, dep = %dep, "dependency has no recorded result");
                JobResult::pending(dep.name())
            }
        })
        .collect();

    DependencyResults::new(wired)
}

fn record_outcome(
    job: &Job,
    slot: JobResult,
    outcome: Waited,
) -> JobResult {
    match outcome {
        Ok(Ok(value)) => {
            debug!(job = %job, id = %job.id(), "job succeeded");
            slot.succeeded(value)
        }
        Ok(Err(err)) => {
            warn!(job = %job, id = %job.id(), error = %format!("{err:#}"), "job failed");
            slot.failed(err)
        }
        Err(join_err) => {
            let cause = join_failure(job, join_err);
            warn!(job = %job, id = %job.id(), error = %cause, "job outcome could not be collected");
            slot.failed(cause)
        }
    }
}

fn join_failure(job: &Job, err: JoinError) -> anyhow::Error {
    if err.is_panic() {
        let payload = err.into_panic();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        anyhow!("job '{job}' panicked: {message}")
    } else {
        anyhow::Error::new(err).context(format!("waiting for job '{job}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::JobStatus;

    fn pending(job: &Job) -> (Job, JobResult) {
        (job.clone(), JobResult::pending(job.name()))
    }

    #[tokio::test]
    async fn a_lost_waiter_is_recorded_as_a_service_error() {
        let healthy = Job::from_fn("healthy", |_deps: &DependencyResults| Ok(JobValue::new(1u8)));
        let orphaned = Job::from_fn("orphaned", |_deps: &DependencyResults| Ok(JobValue::none()));

        let mut in_flight: JoinSet<Waited> = JoinSet::new();
        let mut submitted = HashMap::new();
        let ok = in_flight.spawn(async { Ok(Ok(JobValue::new(1u8))) });
        submitted.insert(ok.id(), pending(&healthy));
        let lost = in_flight.spawn(async {
            if true {
                panic!("waiter went away");
            }
            Ok(Ok(JobValue::none()))
        });
        submitted.insert(lost.id(), pending(&orphaned));

        let mut results = HashMap::new();
        let failures = collect_batch(1, &mut in_flight, &mut submitted, &mut results).await;

        assert_eq!(failures, 1);
        assert!(submitted.is_empty());
        assert_eq!(results[&healthy.id()].status(), JobStatus::Success);

        let lost = &results[&orphaned.id()];
        assert_eq!(lost.status(), JobStatus::ServiceError);
        let message = lost.error_message().unwrap();
        assert!(message.contains("orphaned"), "got: {message}");
        assert!(message.contains("waiter went away"), "got: {message}");
    }
}
