// src/dag/frontier.rs

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::dag::graph::{JobGraph, NodeId};
use crate::errors::{JobdagError, Result};
use crate::job::{Job, JobId};

/// Hands out batches of runnable jobs from a [`JobGraph`].
///
/// Single-use: every call to [`next_batch`](Self::next_batch) removes the
/// returned jobs and marks them finished, until the frontier is drained.
/// The frontier is owned and mutated by the one task driving a run, so its
/// state needs no locking.
#[derive(Debug)]
pub struct ExecutionFrontier {
    graph: JobGraph,
    remaining: VecDeque<Job>,
    finished: HashSet<NodeId>,
    total_job_count: usize,
}

impl ExecutionFrontier {
    pub fn new(graph: JobGraph) -> Self {
        let order = graph.topological_order();
        // The synthetic root leads the order and counts as already finished.
        let total_job_count = order.len().saturating_sub(1);
        let remaining: VecDeque<Job> = graph.ordered_jobs().cloned().collect();

        Self {
            graph,
            remaining,
            finished: HashSet::from([NodeId::Root]),
            total_job_count,
        }
    }

    /// Pop the longest prefix of the remaining order whose dependencies are
    /// all finished, and mark those jobs finished.
    ///
    /// Readiness is judged against the jobs finished before this call, so a
    /// job never shares a batch with one of its dependencies.
    pub fn next_batch(&mut self) -> Result<Vec<Job>> {
        if self.remaining.is_empty() {
            return Err(JobdagError::FrontierExhausted);
        }

        let mut batch = Vec::new();
        while let Some(next) = self.remaining.front() {
            if !self.dependencies_finished(&next.id()) {
                break;
            }
            if let Some(job) = self.remaining.pop_front() {
                batch.push(job);
            }
        }

        self.finished
            .extend(batch.iter().map(|job| NodeId::Job(job.id())));

        debug!(
            batch = batch.len(),
            remaining = self.remaining.len(),
            "frontier handed out batch"
        );

        Ok(batch)
    }

    /// Explicit dependencies of `job` in declaration order; empty for jobs
    /// that only hang off the synthetic root.
    pub fn dependencies_of(&self, job: &JobId) -> Vec<Job> {
        self.graph.dependencies_of(job)
    }

    pub fn has_remaining(&self) -> bool {
        !self.remaining.is_empty()
    }

    /// Number of jobs in the graph, root excluded.
    pub fn total_job_count(&self) -> usize {
        self.total_job_count
    }

    pub fn remaining_job_count(&self) -> usize {
        self.remaining.len()
    }

    pub fn graph(&self) -> &JobGraph {
        &self.graph
    }

    fn dependencies_finished(&self, job: &JobId) -> bool {
        self.graph
            .declared_dependencies(job)
            .iter()
            .all(|dep| self.finished.contains(dep))
    }
}
