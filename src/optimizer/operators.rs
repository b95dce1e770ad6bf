//! Hybrid Grey-Wolf / GA position operators.
//!
//! The grey-wolf pull and the mutation work on a continuous relaxation of
//! the assignment: machine indices are treated as reals, combined, then
//! rounded and clamped back into `[0, M-1]` by [`repair`]. Crossover stays
//! on integer indices.
//!
//! # Reference
//! - Mirjalili, Mirjalili & Lewis (2014), "Grey Wolf Optimizer"
//! - Holland (1975), "Adaptation in Natural and Artificial Systems"

use rand::Rng;
use rand_distr::StandardNormal;

/// Probability that a position takes the arithmetic crossover value.
pub const CROSSOVER_RATE: f64 = 0.5;

/// Probability that a position receives Gaussian noise.
pub const MUTATION_RATE: f64 = 0.1;

/// Linear decay coefficient `a = 2 - 2g/G`, from 2 at the first
/// generation towards 0 at the last.
///
/// A zero budget yields 0 (no generation ever runs).
pub fn decay_coefficient(generation: usize, max_iterations: usize) -> f64 {
    if max_iterations == 0 {
        return 0.0;
    }
    2.0 - 2.0 * generation as f64 / max_iterations as f64
}

/// Grey-Wolf pull of `current` towards `leader`.
///
/// With `A = 2a·r1 - a`, `C = 2·r2` and `D = |C·leader - current|`,
/// returns `leader - A·D`.
pub fn grey_wolf_pull(leader: f64, current: f64, a: f64, r1: f64, r2: f64) -> f64 {
    let a1 = 2.0 * a * r1 - a;
    let c1 = 2.0 * r2;
    let distance = (c1 * leader - current).abs();
    leader - a1 * distance
}

/// Arithmetic crossover: integer mean of the two parent genes.
///
/// The mean truncates, so an odd sum lands on the lower machine index.
#[inline]
pub fn arithmetic_crossover(current: usize, donor: usize) -> f64 {
    ((current + donor) / 2) as f64
}

/// Rounds to the nearest machine index and clamps into `[0, machines - 1]`.
///
/// NaN repairs to machine 0.
///
/// # Example
/// ```
/// use u_cloudsched::optimizer::operators::repair;
///
/// assert_eq!(repair(2.4, 5), 2);
/// assert_eq!(repair(-3.7, 5), 0);
/// assert_eq!(repair(11.2, 5), 4);
/// ```
pub fn repair(x: f64, machines: usize) -> usize {
    let upper = machines.saturating_sub(1) as f64;
    let rounded = x.round();
    if rounded.is_nan() {
        return 0;
    }
    rounded.clamp(0.0, upper) as usize
}

/// Computes the new machine index for one position.
///
/// Random draws are consumed in a fixed order: `r1`, `r2`, the crossover
/// test, the mutation test, then one standard-normal sample only if the
/// mutation fires. Seeded runs depend on this order.
pub fn update_position<R: Rng>(
    current: usize,
    leader: usize,
    runner_up: usize,
    a: f64,
    machines: usize,
    rng: &mut R,
) -> usize {
    let r1: f64 = rng.random();
    let r2: f64 = rng.random();
    let mut x = grey_wolf_pull(leader as f64, current as f64, a, r1, r2);

    if rng.random::<f64>() < CROSSOVER_RATE {
        x = arithmetic_crossover(current, runner_up);
    }
    if rng.random::<f64>() < MUTATION_RATE {
        let noise: f64 = rng.sample(StandardNormal);
        x += noise;
    }

    repair(x, machines)
}
