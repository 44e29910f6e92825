// src/errors.rs

//! Crate-wide error type and `Result` alias.
//!
//! Only structural misuse surfaces as a [`JobdagError`]: an invalid graph,
//! a spent builder, an exhausted frontier, or a bad configuration. Failures
//! of individual jobs are never returned from a run; they are recorded in
//! the [`SuiteResult`](crate::report::SuiteResult) as `anyhow::Error`s.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobdagError {
    #[error("Cycle detected in job graph: {0}")]
    DagCycle(String),

    #[error("Job '{job}' depends on '{dependency}', which was never added to the graph")]
    UndeclaredDependency { job: String, dependency: String },

    #[error("Graph builder already built; create a new one")]
    BuilderConsumed,

    #[error("All jobs have already been handed out by this frontier")]
    FrontierExhausted,

    #[error("No dependency result wired at index {index} (job has {len})")]
    MissingDependencyResult { index: usize, len: usize },

    #[error("Dependency result at index {index} holds no value of type {expected}")]
    DependencyValueMismatch { index: usize, expected: &'static str },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, JobdagError>;
