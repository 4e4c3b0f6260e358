//! Seeded random workload generation.
//!
//! Produces reproducible process sets for demos and invariant testing:
//! the same generator settings and seed always yield the same workload.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{ProcessSpec, Ticks};

/// Random process-set generator.
///
/// # Example
/// ```
/// use u_cpusim::workload::WorkloadGenerator;
///
/// let specs = WorkloadGenerator::new(5, 42).with_burst_range(1, 4).generate();
/// assert_eq!(specs.len(), 5);
/// assert!(specs.iter().all(|s| (1..=4).contains(&s.burst_time)));
/// ```
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    count: usize,
    seed: u64,
    max_arrival: Ticks,
    min_burst: Ticks,
    max_burst: Ticks,
    min_priority: i32,
    max_priority: i32,
}

impl WorkloadGenerator {
    /// Creates a generator for `count` processes.
    ///
    /// Defaults: arrivals in `0..=10`, bursts in `1..=10`, priorities in `0..=5`.
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            count,
            seed,
            max_arrival: 10,
            min_burst: 1,
            max_burst: 10,
            min_priority: 0,
            max_priority: 5,
        }
    }

    /// Sets the latest possible arrival tick (clamped to >= 0).
    pub fn with_arrival_window(mut self, max_arrival: Ticks) -> Self {
        self.max_arrival = max_arrival.max(0);
        self
    }

    /// Sets the inclusive burst range (clamped to >= 1).
    pub fn with_burst_range(mut self, min: Ticks, max: Ticks) -> Self {
        self.min_burst = min.max(1);
        self.max_burst = max.max(self.min_burst);
        self
    }

    /// Sets the inclusive priority range.
    pub fn with_priority_range(mut self, min: i32, max: i32) -> Self {
        self.min_priority = min;
        self.max_priority = max.max(min);
        self
    }

    /// Generates descriptors with IDs `P1..Pn`, in ID order.
    pub fn generate(&self) -> Vec<ProcessSpec> {
        let mut rng = StdRng::seed_from_u64(self.seed);

        (1..=self.count)
            .map(|n| {
                let arrival = rng.random_range(0..=self.max_arrival);
                let burst = rng.random_range(self.min_burst..=self.max_burst);
                let priority = rng.random_range(self.min_priority..=self.max_priority);
                ProcessSpec::new(format!("P{n}"), arrival, burst).with_priority(priority)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_workload() {
        let a = WorkloadGenerator::new(20, 7).generate();
        let b = WorkloadGenerator::new(20, 7).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_different_workload() {
        let a = WorkloadGenerator::new(20, 1).generate();
        let b = WorkloadGenerator::new(20, 2).generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_ranges_respected() {
        let specs = WorkloadGenerator::new(100, 3)
            .with_arrival_window(4)
            .with_burst_range(2, 3)
            .with_priority_range(1, 2)
            .generate();

        for s in &specs {
            assert!((0..=4).contains(&s.arrival_time));
            assert!((2..=3).contains(&s.burst_time));
            assert!((1..=2).contains(&s.priority));
        }
        assert_eq!(specs[0].id.as_deref(), Some("P1"));
        assert_eq!(specs[99].id.as_deref(), Some("P100"));
    }

    #[test]
    fn test_degenerate_ranges_clamped() {
        let specs = WorkloadGenerator::new(10, 0)
            .with_arrival_window(-5)
            .with_burst_range(0, -1)
            .generate();
        assert!(specs
            .iter()
            .all(|s| s.arrival_time == 0 && s.burst_time == 1));
    }

    #[test]
    fn test_empty() {
        assert!(WorkloadGenerator::new(0, 9).generate().is_empty());
    }
}
