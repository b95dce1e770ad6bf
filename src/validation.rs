//! Input validation for assignment problems.
//!
//! Checks the job set and optimizer configuration before any search
//! starts. Detects:
//! - An empty machine pool
//! - An empty population
//! - An empty job set
//! - Jobs whose run time is negative or not finite
//!
//! Every problem is reported, not just the first one.

use std::fmt;

use crate::models::JobSet;
use crate::optimizer::OptimizerConfig;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The machine pool has no machines (M = 0).
    NoMachines,
    /// The population has no candidates (P = 0).
    EmptyPopulation,
    /// There are no jobs to assign.
    NoJobs,
    /// A job's run time is negative, NaN, or infinite.
    InvalidRunTime,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a job set against an optimizer configuration.
///
/// Checks:
/// 1. At least one machine
/// 2. At least one candidate in the population
/// 3. At least one job
/// 4. Every run time is finite and non-negative
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(jobs: &JobSet, config: &OptimizerConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.machines == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoMachines,
            "Machine count must be at least 1",
        ));
    }

    if config.population_size == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyPopulation,
            "Population size must be at least 1",
        ));
    }

    if jobs.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoJobs,
            "Job set is empty; nothing to schedule",
        ));
    }

    for (idx, job) in jobs.iter().enumerate() {
        if !job.has_valid_run_time() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRunTime,
                format!(
                    "Job {} (position {idx}) has invalid run time {}",
                    job.job_number, job.run_time
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
