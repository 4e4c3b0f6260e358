//! Simulation quality metrics.
//!
//! Reduces a finished timeline and its processes into per-process and
//! aggregate scheduling metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - burst |
//! | Response | first dispatch - arrival |
//! | Makespan | end of the last timeline segment |
//! | CPU Utilization | busy ticks / makespan |
//! | Throughput | processes / makespan |
//!
//! Utilization is measured from the timeline, so idle gaps (including the
//! gap before the first arrival) lower it. Ratios over a zero makespan or
//! an empty process set are reported as `0.0`.

use serde::Serialize;

use crate::error::SimError;
use crate::models::{ProcessRecord, Ticks, Timeline};

/// Metrics for a single completed process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessMetrics {
    pub id: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: i32,
    pub completion_time: Ticks,
    pub turnaround_time: Ticks,
    pub waiting_time: Ticks,
    pub response_time: Ticks,
}

/// Per-process table plus aggregate indicators of one run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// One row per process, in input order.
    pub processes: Vec<ProcessMetrics>,
    /// Mean waiting time.
    pub average_waiting_time: f64,
    /// Mean turnaround time.
    pub average_turnaround_time: f64,
    /// Mean response time.
    pub average_response_time: f64,
    /// Busy fraction of the makespan (0.0..=1.0).
    pub cpu_utilization: f64,
    /// Completed processes per tick.
    pub throughput: f64,
    /// End of the last segment.
    pub makespan: Ticks,
    /// Sum of segment durations.
    pub total_busy_time: Ticks,
    /// Idle ticks within the makespan.
    pub idle_time: Ticks,
    /// Segment boundaries that switch to a different process.
    pub context_switches: usize,
}

impl SimulationReport {
    /// Computes the report from completed processes and their timeline.
    ///
    /// # Errors
    /// [`SimError::IncompleteData`] if any process has not completed.
    pub fn reduce(processes: &[ProcessRecord], timeline: &Timeline) -> Result<Self, SimError> {
        let rows = processes
            .iter()
            .map(process_metrics)
            .collect::<Result<Vec<_>, _>>()?;

        let makespan = timeline.makespan();
        let total_busy_time = timeline.busy_time();

        Ok(Self {
            average_waiting_time: mean(rows.iter().map(|r| r.waiting_time)),
            average_turnaround_time: mean(rows.iter().map(|r| r.turnaround_time)),
            average_response_time: mean(rows.iter().map(|r| r.response_time)),
            cpu_utilization: ratio(total_busy_time as f64, makespan),
            throughput: ratio(rows.len() as f64, makespan),
            makespan,
            total_busy_time,
            idle_time: makespan - total_busy_time,
            context_switches: timeline.context_switches(),
            processes: rows,
        })
    }

    /// Row for a given process.
    pub fn process(&self, id: &str) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|m| m.id == id)
    }

    /// Whether the CPU never idled before the last completion.
    pub fn is_fully_utilized(&self) -> bool {
        self.makespan > 0 && self.idle_time == 0
    }
}

fn process_metrics(p: &ProcessRecord) -> Result<ProcessMetrics, SimError> {
    let incomplete = || SimError::IncompleteData {
        process_id: p.id.clone(),
    };
    let completion_time = p.completion_time().ok_or_else(incomplete)?;
    let started_at = p.started_at().ok_or_else(incomplete)?;

    let turnaround_time = completion_time - p.arrival_time;
    Ok(ProcessMetrics {
        id: p.id.clone(),
        arrival_time: p.arrival_time,
        burst_time: p.burst_time,
        priority: p.priority,
        completion_time,
        turnaround_time,
        waiting_time: turnaround_time - p.burst_time,
        response_time: started_at - p.arrival_time,
    })
}

// Summed in i128: each value fits in Ticks, their total may not.
fn mean(values: impl Iterator<Item = Ticks>) -> f64 {
    let (sum, count) = values.fold((0i128, 0usize), |(s, c), v| (s + i128::from(v), c + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

fn ratio(numerator: f64, makespan: Ticks) -> f64 {
    if makespan <= 0 {
        0.0
    } else {
        numerator / makespan as f64
    }
}
