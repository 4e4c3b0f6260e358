//! Process model.
//!
//! A process is the unit of CPU work being scheduled: it becomes ready at
//! its arrival time, needs a fixed number of CPU units (its burst), and
//! carries a priority number.
//!
//! [`ProcessSpec`] is the input descriptor supplied by a caller.
//! [`ProcessRecord`] adds the state the simulation engine advances in place:
//! remaining work, first dispatch time, and completion-derived fields.
//!
//! # Time Representation
//! All times are integer ticks relative to the simulation epoch (t=0).

use serde::{Deserialize, Serialize};

/// Simulated time in abstract CPU units.
pub type Ticks = i64;

/// Input descriptor for a process.
///
/// `id` and `priority` are optional on input: a missing (or empty) id becomes
/// `P<n>` where `n` is the 1-based position in the input list, and a missing
/// priority defaults to 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Caller-provided identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Tick at which the process becomes ready.
    pub arrival_time: Ticks,
    /// Total CPU ticks required.
    pub burst_time: Ticks,
    /// Priority number (lower = more urgent).
    #[serde(default)]
    pub priority: i32,
}

impl ProcessSpec {
    /// Creates a descriptor with an explicit ID.
    pub fn new(id: impl Into<String>, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            id: Some(id.into()),
            arrival_time,
            burst_time,
            priority: 0,
        }
    }

    /// Creates a descriptor whose ID is assigned from its input position.
    pub fn anonymous(arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            id: None,
            arrival_time,
            burst_time,
            priority: 0,
        }
    }

    /// Sets the priority number.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// ID this descriptor resolves to at 0-indexed `position` in its input list.
    pub fn resolved_id(&self, position: usize) -> String {
        match self.id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => format!("P{}", position + 1),
        }
    }

    /// Builds the engine-side record for this descriptor.
    pub fn to_record(&self, position: usize) -> ProcessRecord {
        ProcessRecord::new(self.resolved_id(position), self.arrival_time, self.burst_time)
            .with_priority(self.priority)
    }
}

/// Builds records for a whole input list, assigning default IDs by position.
pub fn records_from_specs(specs: &[ProcessSpec]) -> Vec<ProcessRecord> {
    specs
        .iter()
        .enumerate()
        .map(|(position, spec)| spec.to_record(position))
        .collect()
}

/// Lifecycle state of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessStatus {
    /// Waiting for (more) CPU time, or not yet arrived.
    Ready,
    /// Holding the CPU within the current decision step.
    Running,
    /// All work done. Terminal.
    Completed,
}

/// A process plus its simulation state.
///
/// Identity and scheduling inputs are public and never touched by the
/// engine. Simulation state is only advanced by the engine; callers read it
/// through accessors.
///
/// # Invariants
/// - `remaining` starts at `burst_time`, never increases, and reaches 0 once.
/// - Completion-derived fields are set exactly once, when `remaining` hits 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Unique process identifier.
    pub id: String,
    /// Tick at which the process becomes ready.
    pub arrival_time: Ticks,
    /// Total CPU ticks required.
    pub burst_time: Ticks,
    /// Priority number (lower = more urgent).
    pub priority: i32,
    pub(crate) remaining: Ticks,
    pub(crate) started_at: Option<Ticks>,
    pub(crate) completion_time: Option<Ticks>,
    pub(crate) turnaround_time: Option<Ticks>,
    pub(crate) waiting_time: Option<Ticks>,
    pub(crate) response_time: Option<Ticks>,
    pub(crate) status: ProcessStatus,
}

impl ProcessRecord {
    /// Creates a fresh record with `remaining == burst_time`.
    pub fn new(id: impl Into<String>, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
            priority: 0,
            remaining: burst_time,
            started_at: None,
            completion_time: None,
            turnaround_time: None,
            waiting_time: None,
            response_time: None,
            status: ProcessStatus::Ready,
        }
    }

    /// Sets the priority number.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// CPU ticks still required.
    pub fn remaining(&self) -> Ticks {
        self.remaining
    }

    /// Tick of the first executed unit.
    pub fn started_at(&self) -> Option<Ticks> {
        self.started_at
    }

    pub fn completion_time(&self) -> Option<Ticks> {
        self.completion_time
    }

    pub fn turnaround_time(&self) -> Option<Ticks> {
        self.turnaround_time
    }

    pub fn waiting_time(&self) -> Option<Ticks> {
        self.waiting_time
    }

    pub fn response_time(&self) -> Option<Ticks> {
        self.response_time
    }

    pub fn status(&self) -> ProcessStatus {
        self.status
    }

    /// Whether all work is done.
    pub fn is_completed(&self) -> bool {
        self.status == ProcessStatus::Completed
    }

    /// Whether the process has arrived and still needs CPU time at `clock`.
    #[inline]
    pub fn is_ready_at(&self, clock: Ticks) -> bool {
        self.arrival_time <= clock && self.remaining > 0
    }

    /// Runs `units` ticks starting at `start`, leaving the process Running.
    pub(crate) fn execute(&mut self, start: Ticks, units: Ticks) {
        debug_assert!(units > 0, "Process {} executed for {units} ticks", self.id);
        debug_assert!(
            units <= self.remaining,
            "Process {} executed past its remaining work",
            self.id
        );
        debug_assert!(
            self.status != ProcessStatus::Completed,
            "Completed process {} dispatched again",
            self.id
        );

        if self.started_at.is_none() {
            self.started_at = Some(start);
        }
        self.status = ProcessStatus::Running;
        self.remaining = (self.remaining - units).max(0);
    }

    /// Returns a preempted or sliced-out process to Ready.
    pub(crate) fn release(&mut self) {
        debug_assert!(self.remaining > 0, "Released process {} has no work", self.id);
        self.status = ProcessStatus::Ready;
    }

    /// Marks the process completed at `at` and fills the derived fields.
    pub(crate) fn complete(&mut self, at: Ticks) {
        debug_assert_eq!(self.remaining, 0, "Process {} completed early", self.id);
        debug_assert!(
            self.completion_time.is_none(),
            "Process {} completed twice",
            self.id
        );

        let turnaround = at - self.arrival_time;
        self.completion_time = Some(at);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround - self.burst_time);
        self.response_time = self.started_at.map(|s| s - self.arrival_time);
        self.status = ProcessStatus::Completed;
    }

    /// Discards all simulation state.
    pub(crate) fn reset(&mut self) {
        self.remaining = self.burst_time;
        self.started_at = None;
        self.completion_time = None;
        self.turnaround_time = None;
        self.waiting_time = None;
        self.response_time = None;
        self.status = ProcessStatus::Ready;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_default_ids() {
        let specs = vec![
            ProcessSpec::anonymous(0, 5),
            ProcessSpec::new("worker", 1, 3),
            ProcessSpec::new("", 2, 2),
        ];
        let records = records_from_specs(&specs);
        assert_eq!(records[0].id, "P1");
        assert_eq!(records[1].id, "worker");
        assert_eq!(records[2].id, "P3");
    }

    #[test]
    fn test_spec_priority_defaults_to_zero() {
        let spec: ProcessSpec =
            serde_json::from_str(r#"{"arrival_time": 3, "burst_time": 4}"#).unwrap();
        assert_eq!(spec.priority, 0);
        assert!(spec.id.is_none());
        assert_eq!(spec.to_record(0).remaining(), 4);
    }

    #[test]
    fn test_record_lifecycle() {
        let mut p = ProcessRecord::new("P1", 2, 4).with_priority(3);
        assert_eq!(p.status(), ProcessStatus::Ready);
        assert!(!p.is_ready_at(1));
        assert!(p.is_ready_at(2));

        p.execute(5, 1);
        assert_eq!(p.status(), ProcessStatus::Running);
        assert_eq!(p.started_at(), Some(5));
        p.release();

        p.execute(7, 3);
        assert_eq!(p.started_at(), Some(5)); // first dispatch sticks
        assert_eq!(p.remaining(), 0);
        p.complete(10);

        assert!(p.is_completed());
        assert_eq!(p.completion_time(), Some(10));
        assert_eq!(p.turnaround_time(), Some(8));
        assert_eq!(p.waiting_time(), Some(4));
        assert_eq!(p.response_time(), Some(3));
        assert!(!p.is_ready_at(10));
    }

    #[test]
    fn test_record_reset() {
        let mut p = ProcessRecord::new("P1", 0, 2);
        p.execute(0, 2);
        p.complete(2);
        p.reset();

        assert_eq!(p, ProcessRecord::new("P1", 0, 2));
    }
}
