// src/exec/mod.rs

//! Execution layer.
//!
//! - [`backend`] provides the `ExecutorBackend` trait and the default
//!   `BlockingPoolBackend` that runs jobs on tokio's blocking pool.
//! - [`executor`] owns the batch loop that drives an
//!   [`ExecutionFrontier`](crate::dag::ExecutionFrontier) to completion.

pub mod backend;
pub mod executor;

pub use backend::{BlockingPoolBackend, ExecutorBackend};
pub use executor::JobExecutor;
