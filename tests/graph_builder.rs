// tests/graph_builder.rs

mod common;
use crate::common::{FanGraph, init_tracing};

use jobdag::dag::{GraphBuilder, JobGraph, NodeId};
use jobdag::errors::JobdagError;
use jobdag::job::Job;
use jobdag_test_utils::jobs::inert_job;

fn fan_graph() -> FanGraph {
    FanGraph {
        a: inert_job("a"),
        b: inert_job("b"),
        c: inert_job("c"),
        d: inert_job("d"),
        e: inert_job("e"),
        f: inert_job("f"),
        g: inert_job("g"),
        h: inert_job("h"),
    }
}

fn assert_topological(graph: &JobGraph, jobs: &[&Job]) {
    for job in jobs {
        let pos = graph.position_of(&job.id()).expect("job missing from order");
        for dep in graph.dependencies_of(&job.id()) {
            let dep_pos = graph
                .position_of(&dep.id())
                .expect("dependency missing from order");
            assert!(
                dep_pos < pos,
                "{} (at {dep_pos}) must precede {} (at {pos})",
                dep.name(),
                job.name()
            );
        }
    }
}

fn names_in_order(graph: &JobGraph) -> Vec<&str> {
    graph.ordered_jobs().map(Job::name).collect()
}

#[test]
fn empty_builder_yields_only_the_root() {
    let graph = GraphBuilder::new().build().unwrap();

    assert_eq!(graph.topological_order(), &[NodeId::Root]);
    assert_eq!(graph.job_count(), 0);
}

#[test]
fn fan_graph_order_respects_dependencies() {
    init_tracing();
    let fan = fan_graph();
    let graph = fan.build().unwrap();

    assert_eq!(graph.topological_order().len(), 9);
    assert_eq!(graph.topological_order()[0], NodeId::Root);
    assert_topological(&graph, &fan.all());
}

#[test]
fn ties_are_broken_by_declaration_order() {
    let fan = fan_graph();
    let graph = fan.build().unwrap();

    assert_eq!(
        names_in_order(&graph),
        vec!["a", "b", "c", "d", "e", "f", "g", "h"]
    );
}

#[test]
fn building_the_same_declarations_twice_gives_the_same_order() {
    let fan = fan_graph();
    let first = fan.build().unwrap();
    let second = fan.build().unwrap();

    assert_eq!(first.topological_order(), second.topological_order());
}

#[test]
fn dependencies_are_deduplicated_and_keep_declaration_order() {
    let a = inert_job("a");
    let b = inert_job("b");
    let c = inert_job("c");

    let graph = GraphBuilder::new()
        .add_job(&a)
        .unwrap()
        .add_job(&b)
        .unwrap()
        .add_job_with(&c, [&b, &a, &b])
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(graph.dependencies_of(&c.id()), vec![b.clone(), a.clone()]);
}

#[test]
fn repeated_declarations_accumulate_dependencies() {
    let a = inert_job("a");
    let b = inert_job("b");
    let c = inert_job("c");

    let mut builder = GraphBuilder::new();
    builder
        .add_job(&a)
        .unwrap()
        .add_job(&b)
        .unwrap()
        .add_job_with(&c, [&a])
        .unwrap()
        .add_job_with(&c, [&b, &a])
        .unwrap();
    assert_eq!(builder.job_count(), 3);

    let graph = builder.build().unwrap();
    assert_eq!(graph.dependencies_of(&c.id()), vec![a.clone(), b.clone()]);
    assert_topological(&graph, &[&a, &b, &c]);
}

#[test]
fn jobs_without_explicit_dependencies_report_none() {
    let fan = fan_graph();
    let graph = fan.build().unwrap();

    assert!(graph.dependencies_of(&fan.a.id()).is_empty());
    assert!(graph.dependencies_of(&fan.b.id()).is_empty());
}

#[test]
fn empty_dependency_list_behaves_like_no_dependencies() {
    let a = inert_job("a");
    let graph = GraphBuilder::new()
        .add_job_with(&a, std::iter::empty::<&Job>())
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(graph.job_count(), 1);
    assert_eq!(graph.position_of(&a.id()), Some(1));
    assert!(graph.dependencies_of(&a.id()).is_empty());
}

#[test]
fn implicit_root_is_hidden_once_explicit_dependencies_are_added() {
    let a = inert_job("a");
    let b = inert_job("b");

    let graph = GraphBuilder::new()
        .add_job(&b)
        .unwrap()
        .add_job(&a)
        .unwrap()
        .add_job_with(&a, [&b])
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(graph.dependencies_of(&a.id()), vec![b.clone()]);
    assert_topological(&graph, &[&a, &b]);
}

#[test]
fn jobs_with_the_same_name_are_distinct_nodes() {
    let first = inert_job("compile");
    let second = inert_job("compile");
    assert_ne!(first, second);
    assert_eq!(first, first.clone());

    let graph = GraphBuilder::new()
        .add_job(&first)
        .unwrap()
        .add_job_with(&second, [&first])
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(graph.job_count(), 2);
    assert_eq!(graph.dependencies_of(&second.id()), vec![first.clone()]);
}

#[test]
fn direct_cycle_is_rejected() {
    let x = inert_job("x");
    let y = inert_job("y");

    let result = GraphBuilder::new()
        .add_job_with(&x, [&y])
        .unwrap()
        .add_job_with(&y, [&x])
        .unwrap()
        .build();

    match result {
        Err(JobdagError::DagCycle(msg)) => {
            assert!(msg.contains("cycle detected"), "{msg}");
            assert!(msg.contains("[x, y]"), "{msg}");
        }
        Err(e) => panic!("Expected DagCycle error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn transitive_cycle_is_rejected() {
    let x = inert_job("x");
    let y = inert_job("y");
    let z = inert_job("z");

    let result = GraphBuilder::new()
        .add_job_with(&x, [&y])
        .unwrap()
        .add_job_with(&y, [&z])
        .unwrap()
        .add_job_with(&z, [&x])
        .unwrap()
        .build();

    match result {
        Err(JobdagError::DagCycle(msg)) => assert!(msg.contains("[x, y, z]"), "{msg}"),
        Err(e) => panic!("Expected DagCycle error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn self_dependency_is_a_cycle() {
    let x = inert_job("x");

    let result = GraphBuilder::new().add_job_with(&x, [&x]).unwrap().build();

    assert!(matches!(result, Err(JobdagError::DagCycle(msg)) if msg.contains("[x]")));
}

#[test]
fn cycle_error_names_only_the_jobs_on_the_cycle() {
    let fan = fan_graph();
    let mut builder = GraphBuilder::new();
    fan.declare(&mut builder).unwrap();
    // a <- g closes loops through c, d and g itself; f is stuck behind c but
    // is not part of any loop.
    builder.add_job_with(&fan.a, [&fan.g]).unwrap();

    match builder.build() {
        Err(JobdagError::DagCycle(msg)) => {
            assert!(msg.contains("[a, c, d, g]"), "{msg}");
        }
        Err(e) => panic!("Expected DagCycle error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn dependency_that_was_never_added_is_rejected() {
    let x = inert_job("x");
    let ghost = inert_job("ghost");

    let result = GraphBuilder::new().add_job_with(&x, [&ghost]).unwrap().build();

    match result {
        Err(JobdagError::UndeclaredDependency { job, dependency }) => {
            assert_eq!(job, "x");
            assert_eq!(dependency, "ghost");
        }
        Err(e) => panic!("Expected UndeclaredDependency error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn builder_cannot_be_used_after_build() {
    let a = inert_job("a");
    let mut builder = GraphBuilder::new();
    builder.add_job(&a).unwrap();
    builder.build().unwrap();

    assert!(matches!(builder.add_job(&a), Err(JobdagError::BuilderConsumed)));
    assert!(matches!(
        builder.add_job_with(&a, [&a]),
        Err(JobdagError::BuilderConsumed)
    ));
    assert!(matches!(builder.build(), Err(JobdagError::BuilderConsumed)));
}

#[test]
fn builder_is_spent_even_when_build_fails() {
    let x = inert_job("x");
    let mut builder = GraphBuilder::new();
    builder.add_job_with(&x, [&x]).unwrap();

    assert!(builder.build().is_err());
    assert!(matches!(builder.build(), Err(JobdagError::BuilderConsumed)));
}
