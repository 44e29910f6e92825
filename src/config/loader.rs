// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::ExecutorConfig;
use crate::config::validate::validate_config;
use crate::errors::Result;

/// Load a configuration file from a given path.
///
/// This only performs TOML deserialization; use [`load_and_validate`] to
/// also check semantic constraints.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ExecutorConfig> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading executor config");
    let contents = fs::read_to_string(path)?;
    let config: ExecutorConfig = toml::from_str(&contents)?;
    Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn from_toml_str(contents: &str) -> Result<ExecutorConfig> {
    let config: ExecutorConfig = toml::from_str(contents)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load a configuration file from path and run validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ExecutorConfig> {
    let config = load_from_path(path)?;
    validate_config(&config)?;
    Ok(config)
}
