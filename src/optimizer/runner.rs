//! Optimization driver: population initialization, the hybrid generation
//! loop, and elitist tracking of the best assignment.
//!
//! # Algorithm
//!
//! 1. Draw P random assignments, evaluate each, keep the best.
//! 2. For g in 0..G (hybrid strategy only):
//!    a. Rank the population by fitness; snapshot rank 0 (leader) and
//!       rank 1 (runner-up) for the whole generation.
//!    b. `a = 2 - 2g/G`.
//!    c. Move every position of every candidate with
//!       [`update_position`](super::operators::update_position).
//!    d. Re-evaluate each candidate right after its update; a strictly
//!       better one replaces the best (as a copy).
//!
//! # Complexity
//! O(G * P * T) time, O(P * T) memory.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::candidate::{Candidate, Population};
use super::config::{OptimizerConfig, Strategy};
use super::operators::{decay_coefficient, update_position};
use crate::error::Result;
use crate::kpi::AssignmentKpi;
use crate::models::JobSet;
use crate::validation::validate_input;

/// Read-only view of the search state after one generation.
#[derive(Debug)]
pub struct GenerationSnapshot<'a> {
    /// Zero-based index of the generation that just finished.
    pub generation: usize,
    /// Decay coefficient `a` used in that generation.
    pub decay: f64,
    /// Population after the generation's updates.
    pub population: &'a Population,
    /// Best assignment found so far.
    pub best: &'a Candidate,
}

/// Outcome of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimizerResult {
    /// Best assignment found (an owned snapshot).
    pub best: Candidate,
    /// Strategy that produced it.
    pub strategy: Strategy,
    /// Machine count the assignment refers to.
    pub machines: usize,
    /// Generations executed (0 for random search).
    pub generations: usize,
    /// Fitness evaluations performed.
    pub evaluations: usize,
}

impl OptimizerResult {
    /// Makespan of the best assignment.
    pub fn best_fitness(&self) -> f64 {
        self.best.fitness
    }

    /// Machine index per job of the best assignment.
    pub fn best_assignment(&self) -> &[usize] {
        &self.best.assignment
    }

    /// Computes the reporting metrics of the best assignment.
    ///
    /// `jobs` must be the set the run was performed on.
    pub fn kpi(&self, jobs: &JobSet) -> AssignmentKpi {
        AssignmentKpi::calculate(&self.best.assignment, jobs, self.machines)
    }
}

/// Population-based job-to-machine assignment optimizer.
///
/// # Example
/// ```
/// use u_cloudsched::models::JobSet;
/// use u_cloudsched::optimizer::{Optimizer, OptimizerConfig};
///
/// let jobs = JobSet::from_run_times(&[5.0, 3.0, 10.0, 2.0, 7.0]);
/// let config = OptimizerConfig::default()
///     .with_machines(2)
///     .with_population_size(10)
///     .with_max_iterations(50)
///     .with_seed(42);
///
/// let result = Optimizer::new(config).run(&jobs).unwrap();
/// assert_eq!(result.best_assignment().len(), 5);
/// assert!(result.best_fitness() >= 27.0 / 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct Optimizer {
    config: OptimizerConfig,
}

impl Optimizer {
    /// Creates an optimizer for the given configuration.
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// The configuration this optimizer runs with.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Runs with an RNG seeded from the configuration
    /// (or from the OS when no seed is set).
    pub fn run(&self, jobs: &JobSet) -> Result<OptimizerResult> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.run_with_rng(jobs, &mut rng)
    }

    /// Runs with a caller-supplied random sequence.
    pub fn run_with_rng<R: Rng>(&self, jobs: &JobSet, rng: &mut R) -> Result<OptimizerResult> {
        self.run_observed(jobs, rng, |_| {})
    }

    /// Runs with a caller-supplied random sequence, invoking `observer`
    /// after every generation of the hybrid loop.
    ///
    /// # Errors
    /// Returns [`Error::Invalid`](crate::Error::Invalid) before any search
    /// work if the configuration or the job set is unusable.
    pub fn run_observed<R, F>(
        &self,
        jobs: &JobSet,
        rng: &mut R,
        mut observer: F,
    ) -> Result<OptimizerResult>
    where
        R: Rng,
        F: FnMut(&GenerationSnapshot<'_>),
    {
        validate_input(jobs, &self.config)?;

        let machines = self.config.machines;
        let max_iterations = self.config.max_iterations;
        let run_times: Vec<f64> = jobs.iter().map(|j| j.run_time).collect();
        let tasks = run_times.len();

        tracing::info!(
            strategy = %self.config.strategy,
            tasks,
            machines,
            population = self.config.population_size,
            max_iterations,
            "Starting optimization"
        );

        let (mut population, mut best) = self.initialize(&run_times, rng);
        let mut evaluations = population.len();
        let mut generations = 0;

        if self.config.strategy == Strategy::Hybrid {
            for generation in 0..max_iterations {
                population.rank();
                let a = decay_coefficient(generation, max_iterations);

                let (Some(leader), Some(runner_up)) = (population.leader(), population.runner_up())
                else {
                    unreachable!("validated population has at least one candidate");
                };
                let (leader, runner_up) = (leader.assignment.clone(), runner_up.assignment.clone());

                for candidate in population.candidates_mut() {
                    for j in 0..tasks {
                        candidate.assignment[j] = update_position(
                            candidate.assignment[j],
                            leader[j],
                            runner_up[j],
                            a,
                            machines,
                            rng,
                        );
                    }
                    debug_assert!(candidate.is_valid(tasks, machines));

                    candidate.evaluate(&run_times, machines);
                    evaluations += 1;

                    if candidate.improves_on(&best) {
                        tracing::debug!(generation, fitness = candidate.fitness, "New best assignment");
                        best = candidate.clone();
                    }
                }

                generations += 1;
                tracing::trace!(generation, a, best = best.fitness, "Generation complete");

                observer(&GenerationSnapshot {
                    generation,
                    decay: a,
                    population: &population,
                    best: &best,
                });
            }
        }

        tracing::info!(
            strategy = %self.config.strategy,
            best_fitness = best.fitness,
            generations,
            evaluations,
            "Optimization finished"
        );

        Ok(OptimizerResult {
            best,
            strategy: self.config.strategy,
            machines,
            generations,
            evaluations,
        })
    }

    /// Draws and evaluates the initial population, folding each candidate
    /// into the running best as it is created.
    fn initialize<R: Rng>(&self, run_times: &[f64], rng: &mut R) -> (Population, Candidate) {
        let tasks = run_times.len();
        let machines = self.config.machines;
        let mut best = Candidate::unevaluated(tasks);
        let mut candidates = Vec::with_capacity(self.config.population_size);

        for _ in 0..self.config.population_size {
            let mut candidate = Candidate::random(tasks, machines, rng);
            candidate.evaluate(run_times, machines);
            if candidate.improves_on(&best) {
                best = candidate.clone();
            }
            candidates.push(candidate);
        }

        tracing::debug!(fitness = best.fitness, "Initial population ready");
        (Population::new(candidates), best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::validation::ValidationErrorKind;

    fn small_instance() -> JobSet {
        JobSet::from_run_times(&[5.0, 3.0, 10.0, 2.0, 7.0])
    }

    fn small_config() -> OptimizerConfig {
        OptimizerConfig::default()
            .with_machines(2)
            .with_population_size(10)
            .with_max_iterations(50)
            .with_seed(42)
    }

    fn larger_instance() -> JobSet {
        JobSet::from_run_times(&[
            12.0, 7.0, 3.0, 25.0, 9.0, 14.0, 4.0, 18.0, 6.0, 11.0, 2.0, 21.0, 8.0, 16.0, 5.0,
            13.0, 10.0, 1.0, 19.0, 15.0,
        ])
    }

    #[test]
    fn test_run_basic() {
        let jobs = small_instance();
        let result = Optimizer::new(small_config()).run(&jobs).unwrap();

        assert_eq!(result.strategy, Strategy::Hybrid);
        assert_eq!(result.generations, 50);
        assert_eq!(result.evaluations, 10 + 10 * 50);
        assert!(result.best.is_valid(5, 2));
        // Total 27 on 2 machines: no assignment beats 14 (13.5 rounded up to a subset sum).
        assert!(result.best_fitness() >= 14.0);
        assert!(result.best_fitness() <= 27.0);
    }

    #[test]
    fn test_best_fitness_matches_assignment() {
        let jobs = larger_instance();
        let config = small_config().with_machines(4).with_max_iterations(100);
        let result = Optimizer::new(config).run(&jobs).unwrap();

        let recomputed = crate::fitness::makespan(
            result.best_assignment(),
            &jobs.iter().map(|j| j.run_time).collect::<Vec<_>>(),
            4,
        );
        assert_eq!(result.best_fitness(), recomputed);
    }

    #[test]
    fn test_deterministic_with_seed() {
        let jobs = larger_instance();
        let config = small_config().with_machines(3).with_max_iterations(80);

        let r1 = Optimizer::new(config.clone()).run(&jobs).unwrap();
        let r2 = Optimizer::new(config).run(&jobs).unwrap();

        assert_eq!(r1.best.assignment, r2.best.assignment);
        assert_eq!(r1.best_fitness().to_bits(), r2.best_fitness().to_bits());
    }

    #[test]
    fn test_clamp_invariant_every_generation() {
        let jobs = larger_instance();
        let config = small_config().with_machines(3).with_max_iterations(100);
        let mut rng = StdRng::seed_from_u64(9);
        let mut checked = 0;

        Optimizer::new(config)
            .run_observed(&jobs, &mut rng, |snap| {
                assert!(snap.population.is_valid(20, 3));
                assert_eq!(snap.population.len(), 10);
                checked += 1;
            })
            .unwrap();

        assert_eq!(checked, 100);
    }

    #[test]
    fn test_best_never_regresses() {
        let jobs = larger_instance();
        let config = small_config().with_machines(4).with_max_iterations(200);
        let mut rng = StdRng::seed_from_u64(11);
        let mut history = Vec::new();

        let result = Optimizer::new(config)
            .run_observed(&jobs, &mut rng, |snap| history.push(snap.best.fitness))
            .unwrap();

        assert!(history.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(history.last().copied(), Some(result.best_fitness()));
    }

    #[test]
    fn test_best_is_not_worse_than_population() {
        let jobs = larger_instance();
        let config = small_config().with_machines(4).with_max_iterations(30);
        let mut rng = StdRng::seed_from_u64(5);

        Optimizer::new(config)
            .run_observed(&jobs, &mut rng, |snap| {
                let pop_best = snap.population.best().map(|c| c.fitness).unwrap();
                assert!(snap.best.fitness <= pop_best);
            })
            .unwrap();
    }

    #[test]
    fn test_decay_reported_per_generation() {
        let jobs = small_instance();
        let config = small_config().with_max_iterations(4);
        let mut rng = StdRng::seed_from_u64(1);
        let mut decays = Vec::new();

        Optimizer::new(config)
            .run_observed(&jobs, &mut rng, |snap| decays.push((snap.generation, snap.decay)))
            .unwrap();

        assert_eq!(decays, vec![(0, 2.0), (1, 1.5), (2, 1.0), (3, 0.5)]);
    }

    #[test]
    fn test_zero_iterations_returns_initial_best() {
        let jobs = larger_instance();
        let config = small_config().with_machines(3).with_max_iterations(0);

        let mut rng = StdRng::seed_from_u64(21);
        let mut observed = 0;
        let result = Optimizer::new(config.clone())
            .run_observed(&jobs, &mut rng, |_| observed += 1)
            .unwrap();

        // Reproduce the initial draws independently.
        let mut rng = StdRng::seed_from_u64(21);
        let run_times: Vec<f64> = jobs.iter().map(|j| j.run_time).collect();
        let mut expected = Candidate::unevaluated(20);
        for _ in 0..10 {
            let mut c = Candidate::random(20, 3, &mut rng);
            c.evaluate(&run_times, 3);
            if c.improves_on(&expected) {
                expected = c;
            }
        }

        assert_eq!(observed, 0);
        assert_eq!(result.generations, 0);
        assert_eq!(result.evaluations, 10);
        assert_eq!(result.best, expected);
    }

    #[test]
    fn test_random_search_matches_zero_iteration_hybrid() {
        let jobs = larger_instance();
        let hybrid = small_config().with_machines(3).with_max_iterations(0);
        let random = small_config()
            .with_machines(3)
            .with_strategy(Strategy::RandomSearch);

        let r1 = Optimizer::new(hybrid).run(&jobs).unwrap();
        let r2 = Optimizer::new(random).run(&jobs).unwrap();

        assert_eq!(r2.strategy, Strategy::RandomSearch);
        assert_eq!(r2.generations, 0);
        assert_eq!(r1.best, r2.best);
    }

    #[test]
    fn test_hybrid_not_worse_than_random_search() {
        let jobs = small_instance();
        let hybrid = Optimizer::new(small_config()).run(&jobs).unwrap();
        let random = Optimizer::new(small_config().with_strategy(Strategy::RandomSearch))
            .run(&jobs)
            .unwrap();

        // Same seed -> same initial population; elitism keeps the hybrid at
        // or below the random-search result.
        assert!(hybrid.best_fitness() <= random.best_fitness());
    }

    #[test]
    fn test_single_candidate_population() {
        let jobs = small_instance();
        let config = small_config().with_population_size(1);
        let result = Optimizer::new(config).run(&jobs).unwrap();

        // The leader doubles as runner-up; the full budget still runs.
        assert_eq!(result.generations, 50);
        assert_eq!(result.evaluations, 1 + 50);
        assert!(result.best.is_valid(5, 2));
    }

    #[test]
    fn test_single_machine() {
        let jobs = small_instance();
        let config = small_config().with_machines(1);
        let result = Optimizer::new(config).run(&jobs).unwrap();

        assert!(result.best_assignment().iter().all(|&m| m == 0));
        assert!((result.best_fitness() - 27.0).abs() < 1e-10);
    }

    #[test]
    fn test_invalid_config_fails_before_search() {
        let config = small_config().with_machines(0);
        let mut observed = 0;
        let mut rng = StdRng::seed_from_u64(0);

        let err = Optimizer::new(config)
            .run_observed(&small_instance(), &mut rng, |_| observed += 1)
            .unwrap_err();

        assert_eq!(observed, 0);
        match err {
            Error::Invalid(errors) => {
                assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::NoMachines));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_job_set_rejected() {
        let result = Optimizer::new(small_config()).run(&JobSet::default());
        assert!(matches!(result, Err(Error::Invalid(_))));
    }

    #[test]
    fn test_kpi_from_result() {
        let jobs = small_instance();
        let result = Optimizer::new(small_config()).run(&jobs).unwrap();
        let kpi = result.kpi(&jobs);

        assert_eq!(kpi.makespan, result.best_fitness());
        let u = kpi.utilization.unwrap();
        assert!(u > 0.0 && u <= 1.0 + 1e-10);
    }
}
