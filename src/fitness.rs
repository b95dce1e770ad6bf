//! Makespan fitness and load-derived metrics.
//!
//! All functions are pure and O(T) in the number of jobs.
//!
//! # Degenerate Loads
//! When every machine load is zero (all run times are zero), utilization
//! and load-balance deviation divide by zero. Both are reported as `None`
//! instead of NaN or infinity.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 5: Parallel Machine Models (P||C_max)

/// Per-machine load: sum of run times of the jobs assigned to each machine.
///
/// Machines with no jobs have load 0.
///
/// # Panics
/// Panics if `assignment.len() != run_times.len()` or if any machine
/// index is `>= machines`. Both are invariant violations on the caller's
/// side; the optimizer's repair step keeps every index in range.
pub fn machine_loads(assignment: &[usize], run_times: &[f64], machines: usize) -> Vec<f64> {
    assert_eq!(
        assignment.len(),
        run_times.len(),
        "assignment covers {} jobs, job set has {}",
        assignment.len(),
        run_times.len()
    );
    let mut loads = vec![0.0; machines];
    for (&machine, &run_time) in assignment.iter().zip(run_times) {
        assert!(
            machine < machines,
            "machine index {machine} out of range for {machines} machines"
        );
        loads[machine] += run_time;
    }
    loads
}

/// Maximum load over all machines (C_max).
///
/// # Example
/// ```
/// use u_cloudsched::fitness::makespan;
///
/// // M0 runs jobs 0 and 1 (5 + 3), M1 runs job 2 (10).
/// assert_eq!(makespan(&[0, 0, 1], &[5.0, 3.0, 10.0], 2), 10.0);
/// ```
pub fn makespan(assignment: &[usize], run_times: &[f64], machines: usize) -> f64 {
    max_load(&machine_loads(assignment, run_times, machines))
}

/// Largest value in a load vector (0 for an empty vector).
pub fn max_load(loads: &[f64]) -> f64 {
    loads.iter().copied().fold(0.0, f64::max)
}

/// Fraction of aggregate machine time spent on work:
/// `total_run_time / (makespan * machines)`.
///
/// Returns `None` when `makespan * machines` is zero.
pub fn utilization(total_run_time: f64, makespan: f64, machines: usize) -> Option<f64> {
    let capacity = makespan * machines as f64;
    if capacity > 0.0 {
        Some(total_run_time / capacity)
    } else {
        None
    }
}

/// Normalized spread between the most and least loaded machine:
/// `(max - min) / mean`.
///
/// Returns `None` for an empty load vector or a zero mean load.
pub fn load_balance_deviation(loads: &[f64]) -> Option<f64> {
    if loads.is_empty() {
        return None;
    }
    let mean = loads.iter().sum::<f64>() / loads.len() as f64;
    if mean <= 0.0 {
        return None;
    }
    let max = loads.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = loads.iter().copied().fold(f64::INFINITY, f64::min);
    Some((max - min) / mean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_machine_loads() {
        let loads = machine_loads(&[0, 0, 1], &[5.0, 3.0, 10.0], 2);
        assert_eq!(loads, vec![8.0, 10.0]);
    }

    #[test]
    fn test_makespan_basic() {
        assert!((makespan(&[0, 0, 1], &[5.0, 3.0, 10.0], 2) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_makespan_includes_idle_machines() {
        // M2 and M3 receive nothing but still count (with load 0).
        let loads = machine_loads(&[1, 1], &[2.0, 2.5], 4);
        assert_eq!(loads, vec![0.0, 4.5, 0.0, 0.0]);
        assert!((makespan(&[1, 1], &[2.0, 2.5], 4) - 4.5).abs() < 1e-10);
    }

    #[test]
    fn test_makespan_zero_run_times() {
        assert_eq!(makespan(&[0, 1, 0], &[0.0, 0.0, 0.0], 2), 0.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_index_panics() {
        machine_loads(&[0, 2], &[1.0, 1.0], 2);
    }

    #[test]
    #[should_panic(expected = "assignment covers")]
    fn test_length_mismatch_panics() {
        machine_loads(&[0], &[1.0, 1.0], 2);
    }

    #[test]
    fn test_utilization() {
        // total 18, makespan 10, 2 machines -> 18 / 20
        let u = utilization(18.0, 10.0, 2).unwrap();
        assert!((u - 0.9).abs() < 1e-10);
    }

    #[test]
    fn test_utilization_perfect_balance() {
        let u = utilization(20.0, 10.0, 2).unwrap();
        assert!((u - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_utilization_degenerate() {
        assert_eq!(utilization(0.0, 0.0, 3), None);
    }

    #[test]
    fn test_load_balance_deviation() {
        // loads 8, 10 -> (10 - 8) / 9
        let d = load_balance_deviation(&[8.0, 10.0]).unwrap();
        assert!((d - 2.0 / 9.0).abs() < 1e-10);
    }

    #[test]
    fn test_load_balance_deviation_equal_loads() {
        let d = load_balance_deviation(&[6.0, 6.0, 6.0]).unwrap();
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_load_balance_deviation_degenerate() {
        assert_eq!(load_balance_deviation(&[0.0, 0.0]), None);
        assert_eq!(load_balance_deviation(&[]), None);
    }
}
