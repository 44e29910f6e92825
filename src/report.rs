// src/report.rs

//! Aggregated outcome of one run.

use std::any::Any;
use std::collections::HashMap;

use crate::job::{JobId, JobResult, JobStatus, JobValue};

/// Final report of a run.
///
/// Only jobs that were actually submitted have an entry. Jobs the run never
/// reached because an earlier batch failed are absent and count as failed.
#[derive(Debug, Clone)]
pub struct SuiteResult {
    results: HashMap<JobId, JobResult>,
    total_job_count: usize,
}

impl SuiteResult {
    pub(crate) fn new(results: HashMap<JobId, JobResult>, total_job_count: usize) -> Self {
        Self {
            results,
            total_job_count,
        }
    }

    /// Number of jobs in the graph.
    pub fn total_job_count(&self) -> usize {
        self.total_job_count
    }

    /// Jobs without a recorded outcome: `total - count(Success | ServiceError)`.
    pub fn failed_job_count(&self) -> usize {
        let recorded = self
            .results
            .values()
            .filter(|r| r.status() != JobStatus::Ignored)
            .count();
        self.total_job_count.saturating_sub(recorded)
    }

    /// `true` if any job failed or was never run.
    pub fn has_failures(&self) -> bool {
        self.failed_job_count() > 0
            || self
                .results
                .values()
                .any(|r| r.status() == JobStatus::ServiceError)
    }

    pub fn succeeded_count(&self) -> usize {
        self.results.values().filter(|r| r.is_successful()).count()
    }

    pub fn job_result(&self, job: impl Into<JobId>) -> Option<&JobResult> {
        self.results.get(&job.into())
    }

    pub fn value_of(&self, job: impl Into<JobId>) -> Option<&JobValue> {
        self.job_result(job).and_then(JobResult::value)
    }

    /// Value produced by `job`, as `T`.
    ///
    /// `None` when the job failed, never ran, produced nothing, or produced
    /// something other than a `T`.
    pub fn result_of<T: Any>(&self, job: impl Into<JobId>) -> Option<&T> {
        self.job_result(job).and_then(|r| r.value_as::<T>())
    }

    pub fn error_of(&self, job: impl Into<JobId>) -> Option<&anyhow::Error> {
        self.job_result(job).and_then(JobResult::error)
    }

    /// Causes of every recorded entry that did not succeed.
    pub fn all_errors(&self) -> Vec<&anyhow::Error> {
        self.results
            .values()
            .filter(|r| !r.is_successful())
            .filter_map(JobResult::error)
            .collect()
    }

    pub fn failed_results(&self) -> Vec<&JobResult> {
        self.results
            .values()
            .filter(|r| !r.is_successful())
            .collect()
    }

    pub fn results(&self) -> impl Iterator<Item = (&JobId, &JobResult)> {
        self.results.iter()
    }
}
