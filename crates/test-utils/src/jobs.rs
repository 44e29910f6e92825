//! Ready-made jobs for tests.

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::bail;
use jobdag::job::{Job, JobValue};

/// Job that returns a clone of `value`.
pub fn value_job<T>(name: &str, value: T) -> Job
where
    T: Any + Clone + Send + Sync,
{
    Job::from_fn(name, move |_| Ok(JobValue::new(value.clone())))
}

/// Job that fails with `message`.
pub fn failing_job(name: &str, message: &'static str) -> Job {
    Job::from_fn(name, move |_| bail!(message))
}

/// Job that panics with `message`.
pub fn panicking_job(name: &str, message: &'static str) -> Job {
    Job::from_fn(name, move |_| panic!("{message}"))
}

/// Job that counts how often it ran and returns its own name.
pub fn counting_job(name: &str, runs: Arc<AtomicUsize>) -> Job {
    let owned = name.to_string();
    Job::from_fn(name, move |_| {
        runs.fetch_add(1, Ordering::SeqCst);
        Ok(JobValue::new(owned.clone()))
    })
}

/// Job whose work is never expected to run.
pub fn inert_job(name: &str) -> Job {
    Job::from_fn(name, |_| Ok(JobValue::none()))
}
