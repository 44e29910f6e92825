// src/job/mod.rs

//! Jobs and their outcomes.
//!
//! - [`handle`] defines the identity-bearing [`Job`] handle and the [`Work`]
//!   capability a caller implements.
//! - [`value`] holds the type-erased [`JobValue`] a job produces.
//! - [`deps`] is the ordered, read-only view of dependency results a job
//!   receives when it runs.
//! - [`result`] describes the outcome of one job execution.

pub mod deps;
pub mod handle;
pub mod result;
pub mod value;

pub use deps::DependencyResults;
pub use handle::{Job, JobId, Work};
pub use result::{JobResult, JobStatus};
pub use value::JobValue;
