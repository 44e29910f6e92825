// src/job/value.rs

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

/// Value produced by a job.
///
/// Values are type-erased so jobs with different output types can live in
/// the same graph; consumers recover the concrete type with
/// [`downcast_ref`](Self::downcast_ref). Cloning shares the underlying value.
#[derive(Clone, Default)]
pub struct JobValue {
    inner: Option<Arc<dyn Any + Send + Sync>>,
    type_name: Option<&'static str>,
}

impl JobValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Some(Arc::new(value)),
            type_name: Some(type_name::<T>()),
        }
    }

    /// A job that completed without producing anything.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.inner.is_none()
    }

    /// Borrow the value as `T`, or `None` if it is absent or of another type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.as_deref().and_then(|v| v.downcast_ref::<T>())
    }
}

impl fmt::Debug for JobValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.type_name {
            Some(name) => write!(f, "JobValue(<{name}>)"),
            None => f.write_str("JobValue(none)"),
        }
    }
}
