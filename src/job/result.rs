// src/job/result.rs

use std::any::Any;
use std::sync::Arc;

use crate::job::value::JobValue;

/// How a job execution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobStatus {
    /// The job returned a value.
    Success,
    /// The job returned an error, panicked, or its outcome could not be
    /// collected.
    ServiceError,
    /// No outcome recorded yet.
    #[default]
    Ignored,
}

/// Outcome of a single job execution.
///
/// The executor creates an empty result for a job before submitting it and
/// completes it exactly once through [`succeeded`](Self::succeeded) or
/// [`failed`](Self::failed). There are no setters; a completed result is
/// never changed afterwards.
#[derive(Debug, Clone, Default)]
pub struct JobResult {
    value: Option<JobValue>,
    error: Option<Arc<anyhow::Error>>,
    status: JobStatus,
    job_name: Option<String>,
}

impl JobResult {
    pub(crate) fn pending(job_name: impl Into<String>) -> Self {
        Self {
            job_name: Some(job_name.into()),
            ..Self::default()
        }
    }

    pub(crate) fn succeeded(self, value: JobValue) -> Self {
        Self {
            value: (!value.is_none()).then_some(value),
            status: JobStatus::Success,
            ..self
        }
    }

    pub(crate) fn failed(self, cause: anyhow::Error) -> Self {
        Self {
            value: None,
            error: Some(Arc::new(cause)),
            status: JobStatus::ServiceError,
            ..self
        }
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn is_successful(&self) -> bool {
        self.status == JobStatus::Success
    }

    pub fn job_name(&self) -> Option<&str> {
        self.job_name.as_deref()
    }

    /// The produced value, absent for failed jobs and jobs that returned
    /// [`JobValue::none`].
    pub fn value(&self) -> Option<&JobValue> {
        self.value.as_ref()
    }

    pub fn value_as<T: Any>(&self) -> Option<&T> {
        self.value.as_ref().and_then(|v| v.downcast_ref::<T>())
    }

    pub fn error(&self) -> Option<&anyhow::Error> {
        self.error.as_deref()
    }

    /// Failure cause rendered with its context chain.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| format!("{e:#}"))
    }
}
