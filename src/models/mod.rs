//! Workload domain models.
//!
//! Provides the data types the optimizer reads: individual trace jobs
//! and the fixed batch they are scheduled as.
//!
//! # Domain Mappings
//!
//! | u-cloudsched | Cloud | HPC | Batch |
//! |--------------|-------|-----|-------|
//! | Job | Cloudlet | Job | Work item |
//! | Machine | VM | Node | Worker |
//! | JobSet | Workload | Trace window | Batch |

mod job;
mod job_set;

pub use job::Job;
pub use job_set::JobSet;
