//! Makespan-minimizing job-to-machine assignment for the U-Engine ecosystem.
//!
//! Assigns a static batch of jobs to a fixed pool of identical machines
//! with population-based metaheuristic search, then reports makespan,
//! utilization, and load-balance deviation of the best assignment found.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Job`, `JobSet`
//! - **`trace`**: `JobSource` collaborator and JSON trace loading
//! - **`validation`**: Input checks (machine/population counts, run times)
//! - **`fitness`**: Machine loads, makespan, derived ratios
//! - **`optimizer`**: Hybrid Grey-Wolf/GA search and the random-search baseline
//! - **`kpi`**: Reporting metrics for a finished assignment
//!
//! # Example
//!
//! ```
//! use u_cloudsched::models::JobSet;
//! use u_cloudsched::optimizer::{Optimizer, OptimizerConfig};
//!
//! let jobs = JobSet::from_run_times(&[4.0, 8.0, 15.0, 16.0, 23.0, 42.0]);
//! let config = OptimizerConfig::default()
//!     .with_machines(3)
//!     .with_max_iterations(100)
//!     .with_seed(7);
//!
//! let result = Optimizer::new(config).run(&jobs)?;
//! let kpi = result.kpi(&jobs);
//! assert!(kpi.makespan >= 42.0);
//! # Ok::<(), u_cloudsched::Error>(())
//! ```
//!
//! # References
//!
//! - Mirjalili, Mirjalili & Lewis (2014), "Grey Wolf Optimizer"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

mod error;
pub mod fitness;
pub mod kpi;
pub mod models;
pub mod optimizer;
pub mod trace;
pub mod validation;

pub use error::{Error, Result};
