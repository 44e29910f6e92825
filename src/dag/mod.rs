// src/dag/mod.rs

//! Dependency graph construction and batch scheduling.
//!
//! - [`builder`] accumulates job declarations and validates them into a
//!   [`JobGraph`] (topological order, cycle detection).
//! - [`graph`] holds the immutable validated graph.
//! - [`frontier`] walks a graph batch by batch for the executor.

pub mod builder;
pub mod frontier;
pub mod graph;

pub use builder::GraphBuilder;
pub use frontier::ExecutionFrontier;
pub use graph::{JobGraph, NodeId};
