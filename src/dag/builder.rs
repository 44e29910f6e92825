// src/dag/builder.rs

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use tracing::{debug, info};

use crate::dag::graph::{JobGraph, NodeId};
use crate::errors::{JobdagError, Result};
use crate::job::{Job, JobId};

/// Collects job declarations and turns them into a validated [`JobGraph`].
///
/// The builder is single-shot: after [`build`](Self::build) has been called
/// (successfully or not) every further call fails with
/// [`JobdagError::BuilderConsumed`].
///
/// ```
/// use jobdag::dag::GraphBuilder;
/// use jobdag::job::{Job, JobValue};
///
/// let fetch = Job::from_fn("fetch", |_| Ok(JobValue::new(2_u32)));
/// let double = Job::from_fn("double", |deps| {
///     let n: &u32 = deps.value(0)?;
///     Ok(JobValue::new(n * 2))
/// });
///
/// let graph = GraphBuilder::new()
///     .add_job(&fetch)?
///     .add_job_with(&double, [&fetch])?
///     .build()?;
/// assert_eq!(graph.job_count(), 2);
/// # Ok::<(), jobdag::errors::JobdagError>(())
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Every job seen so far, including ones only referenced as dependencies.
    known: HashMap<JobId, Job>,
    /// Explicitly added jobs, in first-add order.
    insertion: Vec<JobId>,
    /// Job -> what it depends on, de-duplicated, in declaration order.
    dependencies: HashMap<JobId, Vec<NodeId>>,
    built: bool,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of explicitly added jobs.
    pub fn job_count(&self) -> usize {
        self.insertion.len()
    }

    /// Add a job without explicit dependencies.
    pub fn add_job(&mut self, job: &Job) -> Result<&mut Self> {
        self.ensure_open()?;
        self.declare(job, vec![NodeId::Root]);
        Ok(self)
    }

    /// Add a job that depends on `deps`.
    ///
    /// Dependencies keep their declaration order, which is the order their
    /// results are handed to the job. Repeated calls for the same job extend
    /// its dependency list. An empty list behaves like [`add_job`](Self::add_job).
    pub fn add_job_with<'a>(
        &mut self,
        job: &Job,
        deps: impl IntoIterator<Item = &'a Job>,
    ) -> Result<&mut Self> {
        self.ensure_open()?;

        let mut declared = Vec::new();
        for dep in deps {
            self.remember(dep);
            declared.push(NodeId::Job(dep.id()));
        }
        if declared.is_empty() {
            declared.push(NodeId::Root);
        }

        self.declare(job, declared);
        Ok(self)
    }

    /// Validate and linearize the graph.
    ///
    /// Fails with [`JobdagError::UndeclaredDependency`] when a job depends on
    /// something that was never added, and with [`JobdagError::DagCycle`]
    /// when the dependencies form a cycle.
    pub fn build(&mut self) -> Result<JobGraph> {
        self.ensure_open()?;
        self.built = true;

        debug!(jobs = self.insertion.len(), "building job graph");
        let order = self.linearize()?;

        let dependencies = std::mem::take(&mut self.dependencies);
        let jobs = self
            .insertion
            .iter()
            .filter_map(|id| self.known.remove(id).map(|job| (*id, job)))
            .collect::<HashMap<_, _>>();

        info!(jobs = jobs.len(), "job graph built");
        Ok(JobGraph::new(jobs, dependencies, order))
    }

    fn ensure_open(&self) -> Result<()> {
        if self.built {
            return Err(JobdagError::BuilderConsumed);
        }
        Ok(())
    }

    fn remember(&mut self, job: &Job) {
        self.known.entry(job.id()).or_insert_with(|| job.clone());
    }

    fn declare(&mut self, job: &Job, deps: Vec<NodeId>) {
        self.remember(job);

        let entry = match self.dependencies.entry(job.id()) {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => {
                self.insertion.push(job.id());
                v.insert(Vec::with_capacity(deps.len()))
            }
        };

        for dep in deps {
            if !entry.contains(&dep) {
                entry.push(dep);
            }
        }

        debug!(job = %job, deps = entry.len(), "declared job");
    }

    /// Successor lists: dependency -> jobs waiting on it.
    ///
    /// Walks jobs in first-add order so successors come out in that order too.
    fn reverse_graph(&self) -> HashMap<NodeId, Vec<NodeId>> {
        let mut successors: HashMap<NodeId, Vec<NodeId>> = HashMap::new();

        for id in &self.insertion {
            for dep in self.dependencies.get(id).into_iter().flatten() {
                successors.entry(*dep).or_default().push(NodeId::Job(*id));
            }
        }

        successors
    }

    /// Kahn's algorithm seeded with the synthetic root.
    ///
    /// Successor edges are consumed as nodes are dequeued; any edge left over
    /// at the end belongs to a node that never became ready.
    fn linearize(&self) -> Result<Vec<NodeId>> {
        let mut successors = self.reverse_graph();
        let mut waiting_on: HashMap<NodeId, HashSet<NodeId>> = self
            .dependencies
            .iter()
            .map(|(id, deps)| (NodeId::Job(*id), deps.iter().copied().collect()))
            .collect();

        let mut order = Vec::with_capacity(self.insertion.len() + 1);
        let mut ready = VecDeque::from([NodeId::Root]);

        while let Some(node) = ready.pop_front() {
            order.push(node);

            for succ in successors.remove(&node).unwrap_or_default() {
                if let Some(remaining) = waiting_on.get_mut(&succ) {
                    remaining.remove(&node);
                    if remaining.is_empty() {
                        ready.push_back(succ);
                    }
                }
            }
        }

        if !successors.is_empty() {
            return Err(self.unresolved_error(&successors));
        }

        Ok(order)
    }

    fn unresolved_error(&self, leftover: &HashMap<NodeId, Vec<NodeId>>) -> JobdagError {
        for id in &self.insertion {
            for dep in self.dependencies.get(id).into_iter().flatten() {
                if let NodeId::Job(dep_id) = dep {
                    if !self.dependencies.contains_key(dep_id) {
                        return JobdagError::UndeclaredDependency {
                            job: self.name_of(&NodeId::Job(*id)),
                            dependency: self.name_of(dep),
                        };
                    }
                }
            }
        }

        let mut stuck: DiGraphMap<NodeId, ()> = DiGraphMap::new();
        for (from, tos) in leftover {
            for to in tos {
                stuck.add_edge(*from, *to, ());
            }
        }

        let mut cycles: Vec<String> = tarjan_scc(&stuck)
            .into_iter()
            .filter(|scc| scc.len() > 1 || stuck.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut names: Vec<String> = scc.iter().map(|n| self.name_of(n)).collect();
                names.sort();
                format!("[{}]", names.join(", "))
            })
            .collect();
        cycles.sort();

        if cycles.is_empty() {
            let mut names: Vec<String> = leftover.keys().map(|n| self.name_of(n)).collect();
            names.sort();
            return JobdagError::DagCycle(format!(
                "dependencies of jobs [{}] could not be resolved",
                names.join(", ")
            ));
        }

        JobdagError::DagCycle(format!(
            "cycle detected among jobs {}",
            cycles.join(", ")
        ))
    }

    fn name_of(&self, node: &NodeId) -> String {
        match node {
            NodeId::Root => "<root>".to_string(),
            NodeId::Job(id) => self
                .known
                .get(id)
                .map(|job| job.name().to_string())
                .unwrap_or_else(|| id.to_string()),
        }
    }
}
