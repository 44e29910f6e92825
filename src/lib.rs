// src/lib.rs

//! In-memory DAG job scheduler.
//!
//! Jobs are declared with their dependencies on a [`GraphBuilder`], which
//! validates the graph (no cycles, no undeclared dependencies) and fixes a
//! topological order. A [`JobExecutor`] then runs the graph batch by batch:
//! every job whose dependencies have finished runs concurrently with the rest
//! of its batch, receives its dependencies' results in declaration order, and
//! the first failing batch stops the run. The outcome is a [`SuiteResult`].
//!
//! ```
//! use jobdag::{GraphBuilder, Job, JobExecutor, JobValue};
//!
//! # #[tokio::main(flavor = "multi_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let hello = Job::from_fn("hello", |_| Ok(JobValue::new("hello".to_string())));
//! let world = Job::from_fn("world", |deps| {
//!     let greeting: &String = deps.value(0)?;
//!     Ok(JobValue::new(format!("{greeting} world")))
//! });
//!
//! let graph = GraphBuilder::new()
//!     .add_job(&hello)?
//!     .add_job_with(&world, [&hello])?
//!     .build()?;
//!
//! let report = JobExecutor::new().run(graph).await;
//! assert!(!report.has_failures());
//! assert_eq!(report.result_of::<String>(&world).map(String::as_str), Some("hello world"));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dag;
pub mod errors;
pub mod exec;
pub mod job;
pub mod logging;
pub mod report;

pub use config::ExecutorConfig;
pub use dag::{ExecutionFrontier, GraphBuilder, JobGraph, NodeId};
pub use errors::{JobdagError, Result};
pub use exec::{BlockingPoolBackend, ExecutorBackend, JobExecutor};
pub use job::{DependencyResults, Job, JobId, JobResult, JobStatus, JobValue, Work};
pub use report::SuiteResult;
