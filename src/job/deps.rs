// src/job/deps.rs

use std::any::{Any, type_name};
use std::slice;

use crate::errors::{JobdagError, Result};
use crate::job::result::JobResult;

/// Results of a job's dependencies, in the order they were declared.
///
/// Built by the executor right before the job is submitted; jobs without
/// explicit dependencies receive an empty view.
#[derive(Debug, Clone, Default)]
pub struct DependencyResults {
    results: Vec<JobResult>,
}

impl DependencyResults {
    pub(crate) fn new(results: Vec<JobResult>) -> Self {
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, JobResult> {
        self.results.iter()
    }

    /// Result of the dependency declared at `index`.
    pub fn get(&self, index: usize) -> Result<&JobResult> {
        self.results
            .get(index)
            .ok_or(JobdagError::MissingDependencyResult {
                index,
                len: self.results.len(),
            })
    }

    /// Value of the dependency declared at `index`, as `T`.
    ///
    /// ```
    /// # use jobdag::job::{DependencyResults, JobValue};
    /// fn shout(deps: &DependencyResults) -> anyhow::Result<JobValue> {
    ///     let word: &String = deps.value(0)?;
    ///     Ok(JobValue::new(word.to_uppercase()))
    /// }
    /// ```
    pub fn value<T: Any>(&self, index: usize) -> Result<&T> {
        self.get(index)?
            .value_as::<T>()
            .ok_or(JobdagError::DependencyValueMismatch {
                index,
                expected: type_name::<T>(),
            })
    }
}

impl<'a> IntoIterator for &'a DependencyResults {
    type Item = &'a JobResult;
    type IntoIter = slice::Iter<'a, JobResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
