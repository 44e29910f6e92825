// src/dag/graph.rs

use std::collections::HashMap;

use crate::job::{Job, JobId};

/// A node of the dependency graph.
///
/// `Root` is the synthetic node every job without explicit dependencies
/// hangs off. It is never scheduled and never shows up in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeId {
    Root,
    Job(JobId),
}

impl From<JobId> for NodeId {
    fn from(id: JobId) -> Self {
        NodeId::Job(id)
    }
}

/// Validated, acyclic job graph produced by
/// [`GraphBuilder::build`](crate::dag::GraphBuilder::build).
///
/// Holds the forward dependency lists (declaration order, de-duplicated) and
/// one topological order that starts with [`NodeId::Root`].
#[derive(Debug, Clone)]
pub struct JobGraph {
    jobs: HashMap<JobId, Job>,
    dependencies: HashMap<JobId, Vec<NodeId>>,
    order: Vec<NodeId>,
}

impl JobGraph {
    pub(crate) fn new(
        jobs: HashMap<JobId, Job>,
        dependencies: HashMap<JobId, Vec<NodeId>>,
        order: Vec<NodeId>,
    ) -> Self {
        Self {
            jobs,
            dependencies,
            order,
        }
    }

    /// Topological order including the synthetic root at position 0.
    pub fn topological_order(&self) -> &[NodeId] {
        &self.order
    }

    /// Jobs in topological order, root excluded.
    pub fn ordered_jobs(&self) -> impl Iterator<Item = &Job> {
        self.order.iter().filter_map(|node| match node {
            NodeId::Root => None,
            NodeId::Job(id) => self.jobs.get(id),
        })
    }

    /// Number of jobs, root excluded.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    pub fn job(&self, id: &JobId) -> Option<&Job> {
        self.jobs.get(id)
    }

    /// Index of the job in [`topological_order`](Self::topological_order).
    pub fn position_of(&self, id: &JobId) -> Option<usize> {
        self.order.iter().position(|node| *node == NodeId::Job(*id))
    }

    /// Raw dependency list, which may contain [`NodeId::Root`].
    pub(crate) fn declared_dependencies(&self, id: &JobId) -> &[NodeId] {
        self.dependencies
            .get(id)
            .map(|deps| deps.as_slice())
            .unwrap_or(&[])
    }

    /// Explicit dependencies of a job in declaration order.
    ///
    /// The synthetic root is filtered out, so a job added without
    /// dependencies yields an empty list.
    pub fn dependencies_of(&self, id: &JobId) -> Vec<Job> {
        self.declared_dependencies(id)
            .iter()
            .filter_map(|node| match node {
                NodeId::Root => None,
                NodeId::Job(dep) => self.jobs.get(dep).cloned(),
            })
            .collect()
    }
}
