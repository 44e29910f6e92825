// src/config/validate.rs

use crate::config::model::ExecutorConfig;
use crate::errors::{JobdagError, Result};

pub fn validate_config(cfg: &ExecutorConfig) -> Result<()> {
    validate_thread_counts(cfg)?;
    validate_thread_name(cfg)?;
    Ok(())
}

fn validate_thread_counts(cfg: &ExecutorConfig) -> Result<()> {
    if cfg.worker_threads == Some(0) {
        return Err(JobdagError::ConfigError(
            "worker_threads must be >= 1 (got 0)".to_string(),
        ));
    }

    if cfg.max_blocking_threads == Some(0) {
        return Err(JobdagError::ConfigError(
            "max_blocking_threads must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn validate_thread_name(cfg: &ExecutorConfig) -> Result<()> {
    if cfg.thread_name.trim().is_empty() {
        return Err(JobdagError::ConfigError(
            "thread_name must not be empty".to_string(),
        ));
    }
    Ok(())
}
