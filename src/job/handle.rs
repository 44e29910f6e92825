// src/job/handle.rs

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use uuid::Uuid;

use crate::job::deps::DependencyResults;
use crate::job::value::JobValue;

/// Globally unique job identity.
///
/// Assigned at construction and never derived from the job's name, so two
/// jobs called "compile" are still distinct graph nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobId(Uuid);

impl JobId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<&Job> for JobId {
    fn from(job: &Job) -> Self {
        job.id
    }
}

/// The unit of work behind a [`Job`].
///
/// `deps` holds the results of the job's declared dependencies, in declaration
/// order. Returning `Err` marks the job as failed and stops the run after the
/// current batch.
///
/// Closures of the matching shape implement this trait; [`Job::from_fn`]
/// spares callers the type annotations.
pub trait Work: Send + Sync + 'static {
    fn call(&self, deps: &DependencyResults) -> anyhow::Result<JobValue>;
}

impl<F> Work for F
where
    F: Fn(&DependencyResults) -> anyhow::Result<JobValue> + Send + Sync + 'static,
{
    fn call(&self, deps: &DependencyResults) -> anyhow::Result<JobValue> {
        self(deps)
    }
}

/// Identity-bearing handle to a unit of work.
///
/// Cheap to clone; clones share the same [`JobId`] and therefore refer to the
/// same graph node. Equality and hashing look at the id only.
#[derive(Clone)]
pub struct Job {
    id: JobId,
    name: Arc<str>,
    work: Arc<dyn Work>,
}

impl Job {
    pub fn new(name: impl Into<String>, work: impl Work) -> Self {
        Self {
            id: JobId::generate(),
            name: Arc::from(name.into()),
            work: Arc::new(work),
        }
    }

    /// Build a job from a closure.
    ///
    /// ```
    /// use jobdag::job::{Job, JobValue};
    ///
    /// let job = Job::from_fn("greet", |_deps| Ok(JobValue::new("hello")));
    /// assert_eq!(job.name(), "greet");
    /// ```
    pub fn from_fn<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&DependencyResults) -> anyhow::Result<JobValue> + Send + Sync + 'static,
    {
        Self::new(name, f)
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute the job's work with the given dependency results.
    pub fn call(&self, deps: &DependencyResults) -> anyhow::Result<JobValue> {
        self.work.call(deps)
    }
}

impl PartialEq for Job {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Job {}

impl Hash for Job {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
