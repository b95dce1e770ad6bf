//! Job (trace record) model.
//!
//! A job is one unit of work from a workload trace. Only the run time
//! takes part in optimization; every other column is carried along so
//! that reporting layers can show it.
//!
//! # Trace Format
//! Field names follow the Standard Workload Format column headers
//! (`"Job Number"`, `"Run Time"`, ...) as they appear in JSON exports.

use serde::{Deserialize, Serialize};

/// A job to be assigned to a machine.
///
/// # Time Representation
/// `run_time` is a non-negative duration in the trace's time unit
/// (seconds for SWF traces). The optimizer never converts units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Job identifier within the trace.
    #[serde(rename = "Job Number", default)]
    pub job_number: i64,
    /// Submission time.
    #[serde(rename = "Submit Time", default)]
    pub submit_time: i64,
    /// Time spent waiting in the queue.
    #[serde(rename = "Wait Time", default)]
    pub wait_time: i64,
    /// Execution duration. The only field read by the optimizer.
    #[serde(rename = "Run Time")]
    pub run_time: f64,
    /// Processors actually allocated.
    #[serde(rename = "Number of Allocated Processors", default)]
    pub allocated_processors: i64,
    /// Average CPU time used per processor.
    #[serde(rename = "Average CPU Time Used", default)]
    pub average_cpu_time_used: f64,
    /// Memory used (KB).
    #[serde(rename = "Used Memory", default)]
    pub used_memory: i64,
    /// Processors requested at submission.
    #[serde(rename = "Requested Number of Processors", default)]
    pub requested_processors: i64,
    /// Wall time requested at submission.
    #[serde(rename = "Requested Time", default)]
    pub requested_time: i64,
    /// Memory requested (KB).
    #[serde(rename = "Requested Memory", default)]
    pub requested_memory: i64,
    /// Completion status as recorded in the trace.
    #[serde(rename = "Status", default, deserialize_with = "status_from_any")]
    pub status: String,
    /// Submitting user.
    #[serde(rename = "User ID", default)]
    pub user_id: i64,
    /// Submitting group.
    #[serde(rename = "Group ID", default)]
    pub group_id: i64,
    /// Executable (application) number.
    #[serde(rename = "Executable Number", default)]
    pub executable_number: i64,
    /// Queue the job was submitted to.
    #[serde(rename = "Queue Number", default)]
    pub queue_number: i64,
    /// Partition the job ran in.
    #[serde(rename = "Partition Number", default)]
    pub partition_number: i64,
    /// Job this one depends on (`-1` = none).
    #[serde(rename = "Preceding Job Number", default = "no_preceding_job")]
    pub preceding_job_number: i64,
    /// Delay after the preceding job finished.
    #[serde(rename = "Think Time from Preceding Job", default)]
    pub think_time_from_preceding_job: f64,
}

fn no_preceding_job() -> i64 {
    -1
}

// Traces export status either as a code (`1`) or as text (`"1"`, `"completed"`).
fn status_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

impl Job {
    /// Creates a job with the given trace number and run time.
    ///
    /// All other trace columns start at zero / empty.
    pub fn new(job_number: i64, run_time: f64) -> Self {
        Self {
            job_number,
            submit_time: 0,
            wait_time: 0,
            run_time,
            allocated_processors: 0,
            average_cpu_time_used: 0.0,
            used_memory: 0,
            requested_processors: 0,
            requested_time: 0,
            requested_memory: 0,
            status: String::new(),
            user_id: 0,
            group_id: 0,
            executable_number: 0,
            queue_number: 0,
            partition_number: 0,
            preceding_job_number: -1,
            think_time_from_preceding_job: 0.0,
        }
    }

    /// Sets the submit time.
    pub fn with_submit_time(mut self, submit_time: i64) -> Self {
        self.submit_time = submit_time;
        self
    }

    /// Sets the requested processor count.
    pub fn with_requested_processors(mut self, processors: i64) -> Self {
        self.requested_processors = processors;
        self
    }

    /// Sets the submitting user.
    pub fn with_user(mut self, user_id: i64) -> Self {
        self.user_id = user_id;
        self
    }

    /// Sets the completion status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Whether the run time is usable for load computation
    /// (finite and non-negative).
    pub fn has_valid_run_time(&self) -> bool {
        self.run_time.is_finite() && self.run_time >= 0.0
    }
}
