// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The executor hands each runnable job to an `ExecutorBackend` and awaits
//! the returned handle. This keeps worker-pool provisioning out of the
//! scheduling loop and lets tests swap in fakes (for example a backend whose
//! handles are aborted, to exercise infrastructure failures).

use tokio::task::JoinHandle;
use tracing::info_span;

use crate::job::{DependencyResults, Job, JobValue};

/// Trait abstracting where submitted jobs run.
///
/// Implementations must start the job right away; the executor submits a
/// whole batch before awaiting any of it.
pub trait ExecutorBackend: Send + Sync {
    fn submit(&self, job: Job, deps: DependencyResults) -> JoinHandle<anyhow::Result<JobValue>>;
}

/// Default backend: every job gets its own thread from tokio's blocking
/// pool, which grows on demand, so jobs are free to block.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockingPoolBackend;

impl ExecutorBackend for BlockingPoolBackend {
    fn submit(&self, job: Job, deps: DependencyResults) -> JoinHandle<anyhow::Result<JobValue>> {
        let span = info_span!("job", name = %job.name(), id = %job.id());
        tokio::task::spawn_blocking(move || span.in_scope(|| job.call(&deps)))
    }
}
