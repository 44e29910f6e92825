// tests/graph_properties.rs

use std::collections::BTreeSet;

use proptest::prelude::*;

use jobdag::dag::{ExecutionFrontier, GraphBuilder};
use jobdag::errors::JobdagError;
use jobdag::job::Job;
use jobdag_test_utils::jobs::inert_job;

/// Dependency lists for an acyclic graph: job `i` may only depend on jobs
/// `0..i`. Also yields a declaration order, so jobs are not always added
/// dependencies-first.
fn dag_strategy(max_jobs: usize) -> impl Strategy<Value = (Vec<BTreeSet<usize>>, Vec<usize>)> {
    (1..=max_jobs).prop_flat_map(|num_jobs| {
        let deps = proptest::collection::vec(
            proptest::collection::vec(any::<usize>(), 0..num_jobs),
            num_jobs,
        )
        .prop_map(|raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, picks)| {
                    if i == 0 {
                        BTreeSet::new()
                    } else {
                        picks.into_iter().map(|p| p % i).collect()
                    }
                })
                .collect::<Vec<_>>()
        });
        let order = Just((0..num_jobs).collect::<Vec<_>>()).prop_shuffle();
        (deps, order)
    })
}

fn declare(
    builder: &mut GraphBuilder,
    jobs: &[Job],
    deps: &[BTreeSet<usize>],
    order: &[usize],
) -> jobdag::Result<()> {
    for &i in order {
        if deps[i].is_empty() {
            builder.add_job(&jobs[i])?;
        } else {
            builder.add_job_with(&jobs[i], deps[i].iter().map(|&d| &jobs[d]))?;
        }
    }
    Ok(())
}

fn make_jobs(n: usize) -> Vec<Job> {
    (0..n).map(|i| inert_job(&format!("job_{i}"))).collect()
}

proptest! {
    #[test]
    fn acyclic_graphs_build_in_topological_order((deps, order) in dag_strategy(12)) {
        let jobs = make_jobs(deps.len());
        let mut builder = GraphBuilder::new();
        declare(&mut builder, &jobs, &deps, &order).unwrap();
        let graph = builder.build().unwrap();

        prop_assert_eq!(graph.topological_order().len(), jobs.len() + 1);
        for (i, job) in jobs.iter().enumerate() {
            let pos = graph.position_of(&job.id()).unwrap();
            for &d in &deps[i] {
                let dep_pos = graph.position_of(&jobs[d].id()).unwrap();
                prop_assert!(dep_pos < pos, "job_{} must precede job_{}", d, i);
            }
            if deps[i].is_empty() {
                prop_assert!(graph.dependencies_of(&job.id()).is_empty());
            }
        }
    }

    #[test]
    fn rebuilding_identical_declarations_is_deterministic((deps, order) in dag_strategy(10)) {
        let jobs = make_jobs(deps.len());

        let mut first = GraphBuilder::new();
        declare(&mut first, &jobs, &deps, &order).unwrap();
        let mut second = GraphBuilder::new();
        declare(&mut second, &jobs, &deps, &order).unwrap();

        let first = first.build().unwrap();
        let second = second.build().unwrap();
        prop_assert_eq!(first.topological_order(), second.topological_order());
    }

    #[test]
    fn frontier_hands_out_every_job_exactly_once((deps, order) in dag_strategy(12)) {
        let jobs = make_jobs(deps.len());
        let mut builder = GraphBuilder::new();
        declare(&mut builder, &jobs, &deps, &order).unwrap();
        let mut frontier = ExecutionFrontier::new(builder.build().unwrap());

        let mut seen = BTreeSet::new();
        let mut handed_out = 0;
        while frontier.has_remaining() {
            let batch = frontier.next_batch().unwrap();
            prop_assert!(!batch.is_empty());
            for job in &batch {
                // Every dependency was handed out in an earlier batch.
                for dep in frontier.dependencies_of(&job.id()) {
                    prop_assert!(seen.contains(&dep.id()));
                }
            }
            handed_out += batch.len();
            seen.extend(batch.iter().map(|job| job.id()));
        }

        prop_assert_eq!(handed_out, frontier.total_job_count());
        prop_assert_eq!(seen.len(), jobs.len());
    }

    #[test]
    fn any_back_edge_is_reported_as_a_cycle(
        (deps, order) in dag_strategy(12),
        from in any::<usize>(),
        to in any::<usize>(),
    ) {
        let jobs = make_jobs(deps.len());
        let n = jobs.len();
        // `low` depending on `high` (high >= low) closes a loop whenever high
        // already reaches low; forcing the edge high -> low first guarantees it.
        let low = from % n;
        let high = low + to % (n - low);

        let mut builder = GraphBuilder::new();
        declare(&mut builder, &jobs, &deps, &order).unwrap();
        if high != low {
            builder.add_job_with(&jobs[high], [&jobs[low]]).unwrap();
        }
        builder.add_job_with(&jobs[low], [&jobs[high]]).unwrap();

        let result = builder.build();
        prop_assert!(matches!(result, Err(JobdagError::DagCycle(_))));
    }
}
