// src/config/model.rs

use serde::Deserialize;

use crate::errors::Result;
use crate::logging::{self, LogLevel};

/// Settings for the worker pool that runs job batches.
///
/// ```toml
/// worker_threads = 4
/// max_blocking_threads = 64
/// thread_name = "jobdag-worker"
/// log_level = "debug"
/// ```
///
/// Every key is optional. Jobs run on tokio's blocking pool, which grows on
/// demand up to `max_blocking_threads`; the async worker threads only drive
/// the scheduling loop.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecutorConfig {
    /// Async worker threads. `None` lets tokio pick (one per core).
    pub worker_threads: Option<usize>,

    /// Upper bound for the elastic blocking pool. `None` keeps tokio's default.
    pub max_blocking_threads: Option<usize>,

    /// Name given to runtime threads.
    pub thread_name: String,

    /// Log level installed by [`ExecutorConfig::init_logging`]. Falls back to
    /// `JOBDAG_LOG`, then `info`.
    pub log_level: Option<LogLevel>,
}

fn default_thread_name() -> String {
    "jobdag-worker".to_string()
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            worker_threads: None,
            max_blocking_threads: None,
            thread_name: default_thread_name(),
            log_level: None,
        }
    }
}

impl ExecutorConfig {
    /// Level the subscriber would be installed with.
    pub fn effective_log_level(&self) -> tracing::Level {
        logging::effective_level(self.log_level)
    }

    /// Install the global `tracing` subscriber at this config's level.
    pub fn init_logging(&self) -> Result<()> {
        logging::init_logging(self.log_level)
    }

    /// Build a multi-threaded tokio runtime according to this config.
    pub fn build_runtime(&self) -> Result<tokio::runtime::Runtime> {
        let mut builder = tokio::runtime::Builder::new_multi_thread();
        builder.enable_all().thread_name(self.thread_name.clone());

        if let Some(n) = self.worker_threads {
            builder.worker_threads(n);
        }
        if let Some(n) = self.max_blocking_threads {
            builder.max_blocking_threads(n);
        }

        Ok(builder.build()?)
    }
}
