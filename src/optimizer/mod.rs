//! Metaheuristic assignment optimization.
//!
//! Searches job-to-machine assignments for minimum makespan with a
//! hybrid of the Grey Wolf Optimizer (positional pull towards the
//! current leader) and a genetic algorithm (arithmetic crossover with the
//! runner-up, Gaussian mutation).
//!
//! # Encoding
//!
//! One integer vector per candidate: element `j` is the machine index of
//! job `j`. Operators act on a continuous relaxation and are rounded and
//! clamped back to valid indices after every update.
//!
//! # Strategies
//!
//! - [`Strategy::Hybrid`]: random initialization + generation loop.
//! - [`Strategy::RandomSearch`]: random initialization only (baseline).
//!
//! # Submodules
//!
//! - [`operators`]: Per-position update rule and repair
//!
//! # Reference
//! - Mirjalili, Mirjalili & Lewis (2014), "Grey Wolf Optimizer"
//! - Pinedo (2016), "Scheduling", Ch. 5: Parallel Machine Models

mod candidate;
mod config;
pub mod operators;
mod runner;

pub use candidate::{Candidate, Population};
pub use config::{OptimizerConfig, Strategy};
pub use runner::{GenerationSnapshot, Optimizer, OptimizerResult};
