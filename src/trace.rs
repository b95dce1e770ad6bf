//! Job trace ingestion.
//!
//! The optimizer reads jobs only through [`JobSource`], so it has no
//! knowledge of where a workload comes from. Two sources are provided:
//! JSON trace files and in-memory job lists.
//!
//! # JSON Format
//!
//! A top-level array of records keyed by trace column names:
//!
//! ```json
//! [
//!   { "Job Number": 1, "Submit Time": 0, "Run Time": 1240, "Status": 1 },
//!   { "Job Number": 2, "Submit Time": 4, "Run Time": 95, "Status": 1 }
//! ]
//! ```
//!
//! Only `"Run Time"` is required.

use std::fs;
use std::path::PathBuf;

use crate::error::Result;
use crate::models::{Job, JobSet};

/// Supplies the job set for an optimization run.
pub trait JobSource {
    /// Loads the jobs, in assignment order.
    fn load(&self) -> Result<JobSet>;
}

/// Parses a JSON trace document into a job set.
pub fn parse_trace(json: &str) -> Result<JobSet> {
    let jobs: Vec<Job> = serde_json::from_str(json)?;
    Ok(JobSet::new(jobs))
}

/// A JSON trace file on disk.
///
/// # Example
/// ```no_run
/// use u_cloudsched::trace::{JobSource, JsonTraceSource};
///
/// let jobs = JsonTraceSource::new("resources/job_scheduling_dataset.json")
///     .with_limit(30)
///     .load()
///     .unwrap();
/// assert!(jobs.len() <= 30);
/// ```
#[derive(Debug, Clone)]
pub struct JsonTraceSource {
    path: PathBuf,
    limit: Option<usize>,
}

impl JsonTraceSource {
    /// Creates a source for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            limit: None,
        }
    }

    /// Keeps only the first `limit` jobs of the trace.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl JobSource for JsonTraceSource {
    fn load(&self) -> Result<JobSet> {
        let contents = fs::read_to_string(&self.path)?;
        let mut jobs = parse_trace(&contents)?;
        let total = jobs.len();
        if let Some(limit) = self.limit {
            jobs = jobs.truncated(limit);
        }
        tracing::info!(
            path = %self.path.display(),
            total,
            loaded = jobs.len(),
            "Loaded job trace"
        );
        Ok(jobs)
    }
}

impl JobSource for JobSet {
    fn load(&self) -> Result<JobSet> {
        Ok(self.clone())
    }
}

impl JobSource for Vec<Job> {
    fn load(&self) -> Result<JobSet> {
        Ok(JobSet::new(self.clone()))
    }
}
