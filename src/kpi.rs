//! Assignment quality metrics (KPIs).
//!
//! Computes the reporting metrics of a job-to-machine assignment.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | Largest machine load |
//! | Utilization | total run time / (C_max * M) |
//! | Load Balance Deviation | (max load - min load) / mean load |
//!
//! Utilization and deviation are `None` when every load is zero.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use std::fmt;

use serde::Serialize;

use crate::fitness;
use crate::models::JobSet;

/// Assignment performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentKpi {
    /// Makespan: largest machine load.
    pub makespan: f64,
    /// Fraction of aggregate machine time doing work (0.0..=1.0).
    pub utilization: Option<f64>,
    /// Normalized spread between most and least loaded machine.
    pub load_balance_deviation: Option<f64>,
    /// Per-machine load.
    pub machine_loads: Vec<f64>,
    /// Sum of all run times.
    pub total_run_time: f64,
}

impl AssignmentKpi {
    /// Computes KPIs for an assignment.
    ///
    /// # Arguments
    /// * `assignment` - Machine index per job.
    /// * `jobs` - The job set the assignment indexes.
    /// * `machines` - Machine pool size.
    ///
    /// # Panics
    /// Panics if the assignment length differs from the job count or an
    /// index is out of range.
    pub fn calculate(assignment: &[usize], jobs: &JobSet, machines: usize) -> Self {
        let run_times: Vec<f64> = jobs.iter().map(|j| j.run_time).collect();
        let machine_loads = fitness::machine_loads(assignment, &run_times, machines);
        let makespan = fitness::max_load(&machine_loads);
        let total_run_time = jobs.total_run_time();

        Self {
            makespan,
            utilization: fitness::utilization(total_run_time, makespan, machines),
            load_balance_deviation: fitness::load_balance_deviation(&machine_loads),
            machine_loads,
            total_run_time,
        }
    }

    /// Whether the derived ratios are undefined (all loads zero).
    pub fn is_degenerate(&self) -> bool {
        self.utilization.is_none()
    }
}

impl fmt::Display for AssignmentKpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Makespan: {:.2}", self.makespan)?;
        writeln!(f, "Utilization: {}", Ratio(self.utilization))?;
        write!(f, "Load Balancing: {}", Ratio(self.load_balance_deviation))
    }
}

struct Ratio(Option<f64>);

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v:.2}"),
            None => f.write_str("n/a"),
        }
    }
}
