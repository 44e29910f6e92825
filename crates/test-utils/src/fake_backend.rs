//! Executor backends for tests.

use std::sync::{Arc, Mutex};

use jobdag::exec::{BlockingPoolBackend, ExecutorBackend};
use jobdag::job::{DependencyResults, Job, JobValue};
use tokio::task::JoinHandle;

/// Runs jobs on the blocking pool and records each submission together
/// with the number of dependency results it was wired with.
#[derive(Clone, Default)]
pub struct RecordingBackend {
    submitted: Arc<Mutex<Vec<(String, usize)>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(job name, number of wired dependency results)` in submission order.
    pub fn submitted(&self) -> Vec<(String, usize)> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn submitted_names(&self) -> Vec<String> {
        self.submitted().into_iter().map(|(name, _)| name).collect()
    }
}

impl ExecutorBackend for RecordingBackend {
    fn submit(&self, job: Job, deps: DependencyResults) -> JoinHandle<anyhow::Result<JobValue>> {
        self.submitted
            .lock()
            .unwrap()
            .push((job.name().to_string(), deps.len()));
        BlockingPoolBackend.submit(job, deps)
    }
}

/// Backend whose handles for the named jobs are aborted before they can
/// finish, so awaiting them fails with a cancelled `JoinError`. Other jobs
/// run normally.
pub struct AbortingBackend {
    abort: Vec<String>,
}

impl AbortingBackend {
    pub fn new(abort: &[&str]) -> Self {
        Self {
            abort: abort.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ExecutorBackend for AbortingBackend {
    fn submit(&self, job: Job, deps: DependencyResults) -> JoinHandle<anyhow::Result<JobValue>> {
        if self.abort.iter().any(|name| name == job.name()) {
            let handle = tokio::spawn(async move {
                std::future::pending::<()>().await;
                job.call(&deps)
            });
            handle.abort();
            handle
        } else {
            BlockingPoolBackend.submit(job, deps)
        }
    }
}
