//! Optimizer configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Random initialization followed by the hybrid Grey-Wolf / GA loop.
    #[default]
    Hybrid,
    /// Random initialization only; the best initial draw is returned.
    ///
    /// Baseline for measuring what the generation loop adds.
    RandomSearch,
}

impl Strategy {
    /// Stable identifier used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Hybrid => "hybrid",
            Strategy::RandomSearch => "random-search",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hybrid" | "ga-gwo" | "gagwo" => Ok(Strategy::Hybrid),
            "random-search" | "random" | "baseline" => Ok(Strategy::RandomSearch),
            other => Err(format!(
                "unknown strategy '{other}' (expected 'hybrid' or 'random-search')"
            )),
        }
    }
}

/// Parameters of one optimization run.
///
/// Defaults reproduce the reference experiment: 5 machines, 20 candidates,
/// 1000 generations, hybrid strategy, OS-seeded randomness.
///
/// # Example
/// ```
/// use u_cloudsched::optimizer::{OptimizerConfig, Strategy};
///
/// let config = OptimizerConfig::default()
///     .with_machines(2)
///     .with_population_size(10)
///     .with_max_iterations(50)
///     .with_seed(42);
/// assert_eq!(config.strategy, Strategy::Hybrid);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Machine pool size (M).
    pub machines: usize,
    /// Number of candidates (P).
    pub population_size: usize,
    /// Generation budget. The loop always runs exactly this many generations.
    pub max_iterations: usize,
    /// Search strategy.
    pub strategy: Strategy,
    /// RNG seed. `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            machines: 5,
            population_size: 20,
            max_iterations: 1000,
            strategy: Strategy::Hybrid,
            seed: None,
        }
    }
}

impl OptimizerConfig {
    /// Sets the machine count.
    pub fn with_machines(mut self, machines: usize) -> Self {
        self.machines = machines;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Sets the search strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Fixes the RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
