//! Job set model.
//!
//! The fixed batch of jobs an optimization run works on. Position `j`
//! in the set is the job index used by assignment vectors.

use serde::{Deserialize, Serialize};

use super::Job;

/// An ordered, immutable batch of jobs.
///
/// Assignment vectors are indexed by position in this set, so the order
/// of jobs is significant and never changes after construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobSet {
    jobs: Vec<Job>,
}

impl JobSet {
    /// Creates a job set from trace records.
    pub fn new(jobs: Vec<Job>) -> Self {
        Self { jobs }
    }

    /// Creates a job set from bare run times, numbering jobs from 1.
    ///
    /// # Example
    /// ```
    /// use u_cloudsched::models::JobSet;
    ///
    /// let jobs = JobSet::from_run_times(&[5.0, 3.0, 10.0]);
    /// assert_eq!(jobs.len(), 3);
    /// assert_eq!(jobs.total_run_time(), 18.0);
    /// ```
    pub fn from_run_times(run_times: &[f64]) -> Self {
        let jobs = run_times
            .iter()
            .enumerate()
            .map(|(i, &rt)| Job::new(i as i64 + 1, rt))
            .collect();
        Self { jobs }
    }

    /// Keeps only the first `limit` jobs.
    ///
    /// A limit larger than the set is a no-op.
    pub fn truncated(mut self, limit: usize) -> Self {
        self.jobs.truncate(limit);
        self
    }

    /// Number of jobs (T).
    #[inline]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the set has no jobs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Job at position `index`.
    pub fn get(&self, index: usize) -> Option<&Job> {
        self.jobs.get(index)
    }

    /// All jobs in assignment order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Iterates over jobs in assignment order.
    pub fn iter(&self) -> std::slice::Iter<'_, Job> {
        self.jobs.iter()
    }

    /// Sum of all run times.
    pub fn total_run_time(&self) -> f64 {
        self.jobs.iter().map(|j| j.run_time).sum()
    }
}

impl From<Vec<Job>> for JobSet {
    fn from(jobs: Vec<Job>) -> Self {
        Self::new(jobs)
    }
}

impl<'a> IntoIterator for &'a JobSet {
    type Item = &'a Job;
    type IntoIter = std::slice::Iter<'a, Job>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}
