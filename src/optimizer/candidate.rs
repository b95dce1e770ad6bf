//! Assignment-vector candidates and the population that holds them.
//!
//! # Encoding
//!
//! A candidate is a vector of length T (jobs); element `j` is the index of
//! the machine job `j` runs on. Every element stays in `[0, M)` for the
//! whole run.

use rand::Rng;

use crate::fitness;

/// One job-to-machine assignment under search.
///
/// Lower fitness = better assignment (minimization convention).
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Machine index per job.
    pub assignment: Vec<usize>,
    /// Cached makespan (`f64::INFINITY` until evaluated).
    pub fitness: f64,
}

impl Candidate {
    /// Creates an unevaluated candidate with every job on machine 0.
    pub fn unevaluated(tasks: usize) -> Self {
        Self {
            assignment: vec![0; tasks],
            fitness: f64::INFINITY,
        }
    }

    /// Creates a candidate with one uniform machine draw per job,
    /// in job order.
    pub fn random<R: Rng>(tasks: usize, machines: usize, rng: &mut R) -> Self {
        let assignment = (0..tasks).map(|_| rng.random_range(0..machines)).collect();
        Self {
            assignment,
            fitness: f64::INFINITY,
        }
    }

    /// Recomputes and caches the makespan.
    pub fn evaluate(&mut self, run_times: &[f64], machines: usize) -> f64 {
        self.fitness = fitness::makespan(&self.assignment, run_times, machines);
        self.fitness
    }

    /// Whether this candidate is strictly better than `other`.
    #[inline]
    pub fn improves_on(&self, other: &Candidate) -> bool {
        self.fitness < other.fitness
    }

    /// Whether every machine index is in range and the length matches.
    pub fn is_valid(&self, tasks: usize, machines: usize) -> bool {
        self.assignment.len() == tasks && self.assignment.iter().all(|&m| m < machines)
    }

    /// Number of jobs covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    /// Whether the assignment covers no jobs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }
}

/// A fixed-size set of candidates.
///
/// Candidates are updated in place; the size never changes after
/// construction.
#[derive(Debug, Clone)]
pub struct Population {
    candidates: Vec<Candidate>,
}

impl Population {
    /// Wraps existing candidates.
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    /// Number of candidates (P).
    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the population is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// All candidates in current order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub(crate) fn candidates_mut(&mut self) -> &mut [Candidate] {
        &mut self.candidates
    }

    /// Sorts by ascending fitness.
    ///
    /// The sort is stable: equal-fitness candidates keep their relative
    /// order.
    pub fn rank(&mut self) {
        self.candidates.sort_by(|a, b| a.fitness.total_cmp(&b.fitness));
    }

    /// Rank-0 candidate. Meaningful after [`rank`](Self::rank).
    pub fn leader(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    /// Rank-1 candidate, or the leader when the population has one member.
    pub fn runner_up(&self) -> Option<&Candidate> {
        self.candidates.get(1).or_else(|| self.leader())
    }

    /// Lowest-fitness candidate regardless of current order.
    ///
    /// Ties resolve to the earliest candidate.
    pub fn best(&self) -> Option<&Candidate> {
        self.candidates.iter().fold(None, |best, c| match best {
            Some(b) if !c.improves_on(b) => Some(b),
            _ => Some(c),
        })
    }

    /// Whether every candidate is a valid assignment.
    pub fn is_valid(&self, tasks: usize, machines: usize) -> bool {
        self.candidates.iter().all(|c| c.is_valid(tasks, machines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn with_fitness(assignment: Vec<usize>, fitness: f64) -> Candidate {
        Candidate {
            assignment,
            fitness,
        }
    }

    #[test]
    fn test_random_candidate() {
        let mut rng = SmallRng::seed_from_u64(42);
        let c = Candidate::random(30, 5, &mut rng);

        assert_eq!(c.len(), 30);
        assert!(c.is_valid(30, 5));
        assert_eq!(c.fitness, f64::INFINITY);
    }

    #[test]
    fn test_single_machine_candidate() {
        let mut rng = SmallRng::seed_from_u64(1);
        let c = Candidate::random(10, 1, &mut rng);
        assert!(c.assignment.iter().all(|&m| m == 0));
    }

    #[test]
    fn test_evaluate() {
        let mut c = with_fitness(vec![0, 0, 1], f64::INFINITY);
        let f = c.evaluate(&[5.0, 3.0, 10.0], 2);
        assert!((f - 10.0).abs() < 1e-10);
        assert!((c.fitness - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_improves_on_is_strict() {
        let a = with_fitness(vec![0], 5.0);
        let b = with_fitness(vec![1], 5.0);
        let c = with_fitness(vec![1], 4.0);
        assert!(!a.improves_on(&b));
        assert!(c.improves_on(&a));
        assert!(a.improves_on(&Candidate::unevaluated(1)));
    }

    #[test]
    fn test_invalid_candidate() {
        let c = with_fitness(vec![0, 3], 0.0);
        assert!(!c.is_valid(2, 3));
        assert!(!c.is_valid(3, 4));
        assert!(c.is_valid(2, 4));
    }

    #[test]
    fn test_rank_is_stable() {
        let mut pop = Population::new(vec![
            with_fitness(vec![0], 3.0),
            with_fitness(vec![1], 1.0),
            with_fitness(vec![2], 3.0),
            with_fitness(vec![3], 2.0),
        ]);
        pop.rank();

        let order: Vec<usize> = pop.candidates().iter().map(|c| c.assignment[0]).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
        assert_eq!(pop.leader().map(|c| c.assignment[0]), Some(1));
        assert_eq!(pop.runner_up().map(|c| c.assignment[0]), Some(3));
    }

    #[test]
    fn test_runner_up_single_member() {
        let pop = Population::new(vec![with_fitness(vec![2], 1.0)]);
        assert_eq!(pop.runner_up(), pop.leader());
    }

    #[test]
    fn test_best_keeps_first_on_tie() {
        let pop = Population::new(vec![
            with_fitness(vec![0], 2.0),
            with_fitness(vec![1], 1.0),
            with_fitness(vec![2], 1.0),
        ]);
        assert_eq!(pop.best().map(|c| c.assignment[0]), Some(1));
        assert!(Population::new(Vec::new()).best().is_none());
    }
}
