// src/config/mod.rs

//! Executor configuration.
//!
//! - [`model`] holds the serde model of the TOML file.
//! - [`loader`] reads and parses configuration from disk or a string.
//! - [`validate`] checks semantic constraints after parsing.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{from_toml_str, load_and_validate, load_from_path};
pub use model::ExecutorConfig;
