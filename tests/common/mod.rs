#![allow(dead_code)]

pub use jobdag_test_utils::{init_tracing, with_timeout};

use jobdag::dag::{GraphBuilder, JobGraph};
use jobdag::job::Job;

/// The eight jobs of the fan-out / fan-in fixture.
pub struct FanGraph {
    pub a: Job,
    pub b: Job,
    pub c: Job,
    pub d: Job,
    pub e: Job,
    pub f: Job,
    pub g: Job,
    pub h: Job,
}

impl FanGraph {
    /// ```text
    /// a, b: no deps     c <- a       d <- a, b     e <- b
    /// f <- c            g <- c, a, d, e            h <- e
    /// ```
    ///
    /// Declared in the order f, g, h, c, d, e, a, b.
    pub fn declare(&self, builder: &mut GraphBuilder) -> jobdag::Result<()> {
        builder
            .add_job_with(&self.f, [&self.c])?
            .add_job_with(&self.g, [&self.c, &self.a, &self.d, &self.e])?
            .add_job_with(&self.h, [&self.e])?
            .add_job_with(&self.c, [&self.a])?
            .add_job_with(&self.d, [&self.a, &self.b])?
            .add_job_with(&self.e, [&self.b])?
            .add_job(&self.a)?
            .add_job(&self.b)?;
        Ok(())
    }

    pub fn build(&self) -> jobdag::Result<JobGraph> {
        let mut builder = GraphBuilder::new();
        self.declare(&mut builder)?;
        builder.build()
    }

    pub fn all(&self) -> [&Job; 8] {
        [
            &self.a, &self.b, &self.c, &self.d, &self.e, &self.f, &self.g, &self.h,
        ]
    }
}
