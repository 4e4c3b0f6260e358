//! Discrete-time CPU scheduling engine.
//!
//! # Algorithm
//!
//! The engine is an explicit state machine: [`Simulation::step`] performs
//! exactly one decision and [`Simulation::run`] is nothing more than
//! repeated stepping, so batch and incremental runs produce identical
//! timelines.
//!
//! Per step, depending on the discipline:
//! - **Non-preemptive** (FCFS, SJF, priority): pick the best ready process
//!   by the discipline's rule chain and run it to completion.
//! - **Preemptive** (SRTF, priority): pick the best ready process and run it
//!   until it completes or the next process arrives, whichever is first.
//!   The choice can only change at an arrival, so this is the per-tick
//!   rule evaluated at the ticks where it matters. Consecutive runs of one
//!   process merge into one timeline segment.
//! - **Round Robin**: admit arrivals into a FIFO queue, run the head for
//!   `min(quantum, remaining)` ticks, admit the arrivals that happened inside
//!   the slice `[start, end)`, then re-enqueue the head if it still has work.
//!   A process arriving exactly at `end` is admitted by the next step, behind
//!   the re-enqueued head.
//!
//! When nothing is ready the clock jumps to the next arrival. Idle time is
//! never emitted as a segment.

use std::collections::VecDeque;

use log::{debug, info, trace};
use serde::Serialize;

use super::SimulationReport;
use crate::dispatching::RuleEngine;
use crate::error::SimError;
use crate::models::{
    records_from_specs, Discipline, ProcessRecord, ProcessSpec, Ticks, Timeline, TimelineSegment,
};
use crate::validation::validate_input;

/// Result of a single [`Simulation::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// A process held the CPU for this interval.
    Dispatched(TimelineSegment),
    /// Nothing was ready; the clock jumped forward.
    Idle { from: Ticks, to: Ticks },
    /// Every process has completed. Further steps are no-ops.
    Finished,
}

/// Final state of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationOutput {
    /// Execution trace in chronological order.
    pub timeline: Timeline,
    /// Every process, annotated with completion-derived fields, in input order.
    pub processes: Vec<ProcessRecord>,
}

impl SimulationOutput {
    /// Reduces the run into per-process and aggregate metrics.
    pub fn report(&self) -> Result<SimulationReport, SimError> {
        SimulationReport::reduce(&self.processes, &self.timeline)
    }
}

/// One simulation run: the clock, the process table, and the timeline.
///
/// # Example
///
/// ```
/// use u_cpusim::models::{Discipline, ProcessRecord};
/// use u_cpusim::scheduler::Simulation;
///
/// let processes = vec![
///     ProcessRecord::new("P1", 0, 5),
///     ProcessRecord::new("P2", 1, 3),
/// ];
/// let output = Simulation::new(processes, Discipline::RoundRobin, Some(2))
///     .unwrap()
///     .run()
///     .unwrap();
/// assert_eq!(output.timeline.makespan(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    discipline: Discipline,
    quantum: Option<Ticks>,
    rule_engine: Option<RuleEngine>,
    clock: Ticks,
    processes: Vec<ProcessRecord>,
    timeline: Timeline,
    // Process indices sorted by (arrival, id); `admitted` is the prefix
    // already pushed into the Round Robin queue.
    arrival_order: Vec<usize>,
    admitted: usize,
    ready_queue: VecDeque<usize>,
    remaining_count: usize,
    last_dispatched: Option<usize>,
}

impl Simulation {
    /// Validates the input and builds a fresh run at t=0.
    ///
    /// Any simulation state already present on the records is discarded.
    /// The quantum is only kept for Round Robin.
    pub fn new(
        mut processes: Vec<ProcessRecord>,
        discipline: Discipline,
        quantum: Option<Ticks>,
    ) -> Result<Self, SimError> {
        validate_input(&processes, discipline, quantum)?;

        for p in &mut processes {
            p.reset();
        }

        let mut arrival_order: Vec<usize> = (0..processes.len()).collect();
        arrival_order.sort_by(|&a, &b| {
            processes[a]
                .arrival_time
                .cmp(&processes[b].arrival_time)
                .then_with(|| processes[a].id.cmp(&processes[b].id))
        });

        let quantum = quantum.filter(|_| discipline.requires_quantum());
        debug!(
            "{discipline} simulation of {} process(es), quantum {quantum:?}",
            processes.len()
        );

        Ok(Self {
            discipline,
            quantum,
            rule_engine: RuleEngine::for_discipline(discipline),
            clock: 0,
            remaining_count: processes.len(),
            processes,
            timeline: Timeline::new(),
            arrival_order,
            admitted: 0,
            ready_queue: VecDeque::new(),
            last_dispatched: None,
        })
    }

    /// Builds a run from input descriptors, assigning default IDs.
    pub fn from_specs(
        specs: &[ProcessSpec],
        discipline: Discipline,
        quantum: Option<Ticks>,
    ) -> Result<Self, SimError> {
        Self::new(records_from_specs(specs), discipline, quantum)
    }

    /// Performs one scheduling decision.
    pub fn step(&mut self) -> Result<StepOutcome, SimError> {
        if self.is_finished() {
            return Ok(StepOutcome::Finished);
        }

        let before = self.clock;
        let outcome = match self.discipline {
            Discipline::RoundRobin => self.step_round_robin()?,
            d if d.is_preemptive() => self.step_preemptive()?,
            _ => self.step_non_preemptive()?,
        };

        if self.clock <= before {
            return Err(self.stalled());
        }
        if self.is_finished() {
            info!(
                "{} finished at t={}: {} process(es), {} segment(s)",
                self.discipline,
                self.clock,
                self.processes.len(),
                self.timeline.len()
            );
        }
        Ok(outcome)
    }

    /// Steps until every process has completed.
    pub fn run_to_completion(&mut self) -> Result<(), SimError> {
        while self.step()? != StepOutcome::Finished {}
        Ok(())
    }

    /// Runs to completion and returns the final state.
    pub fn run(mut self) -> Result<SimulationOutput, SimError> {
        self.run_to_completion()?;
        Ok(self.into_output())
    }

    /// Rewinds to t=0 with every process back to its full burst.
    pub fn reset(&mut self) {
        for p in &mut self.processes {
            p.reset();
        }
        self.clock = 0;
        self.timeline.clear();
        self.admitted = 0;
        self.ready_queue.clear();
        self.remaining_count = self.processes.len();
        self.last_dispatched = None;
        debug!("{} simulation reset", self.discipline);
    }

    /// Consumes the run, returning the timeline and annotated processes.
    pub fn into_output(self) -> SimulationOutput {
        SimulationOutput {
            timeline: self.timeline,
            processes: self.processes,
        }
    }

    /// Reduces the current state into a report.
    ///
    /// Fails with [`SimError::IncompleteData`] until the run has finished.
    pub fn report(&self) -> Result<SimulationReport, SimError> {
        SimulationReport::reduce(&self.processes, &self.timeline)
    }

    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    pub fn quantum(&self) -> Option<Ticks> {
        self.quantum
    }

    /// Current simulated time.
    pub fn clock(&self) -> Ticks {
        self.clock
    }

    /// All processes in input order.
    pub fn processes(&self) -> &[ProcessRecord] {
        &self.processes
    }

    /// Finds a process by ID.
    pub fn process(&self, id: &str) -> Option<&ProcessRecord> {
        self.processes.iter().find(|p| p.id == id)
    }

    /// Timeline emitted so far.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Process that held the CPU in the most recent dispatch.
    pub fn last_dispatched(&self) -> Option<&ProcessRecord> {
        self.last_dispatched.map(|idx| &self.processes[idx])
    }

    /// IDs in the Round Robin ready queue, head first.
    pub fn ready_queue(&self) -> impl Iterator<Item = &str> + '_ {
        self.ready_queue
            .iter()
            .map(move |&idx| self.processes[idx].id.as_str())
    }

    /// Whether every process has completed.
    pub fn is_finished(&self) -> bool {
        self.remaining_count == 0
    }

    fn step_non_preemptive(&mut self) -> Result<StepOutcome, SimError> {
        let Some(idx) = self.select_ready() else {
            return self.idle_until_next_arrival();
        };

        let units = self.processes[idx].remaining();
        let segment = self.dispatch(idx, units);
        self.timeline.push(segment.clone());
        self.settle(idx);
        Ok(StepOutcome::Dispatched(segment))
    }

    fn step_preemptive(&mut self) -> Result<StepOutcome, SimError> {
        let Some(idx) = self.select_ready() else {
            return self.idle_until_next_arrival();
        };

        if let Some(prev) = self.last_dispatched.filter(|&prev| prev != idx) {
            if !self.processes[prev].is_completed() {
                debug!(
                    "t={} {} preempts {}",
                    self.clock, self.processes[idx].id, self.processes[prev].id
                );
            }
        }

        let remaining = self.processes[idx].remaining();
        let units = self
            .next_arrival()
            .map_or(remaining, |next| remaining.min(next - self.clock));
        let segment = self.dispatch(idx, units);
        self.timeline.push_merged(segment.clone());
        self.settle(idx);
        Ok(StepOutcome::Dispatched(segment))
    }

    fn step_round_robin(&mut self) -> Result<StepOutcome, SimError> {
        self.admit_arrivals();
        let Some(idx) = self.ready_queue.pop_front() else {
            return self.idle_until_next_arrival();
        };

        let remaining = self.processes[idx].remaining();
        let units = self.quantum.map_or(remaining, |q| q.min(remaining));
        let segment = self.dispatch(idx, units);
        self.timeline.push(segment.clone());

        // Arrivals inside the slice queue ahead of the sliced-out process.
        let end = self.clock;
        self.admit_where(|arrival| arrival < end);
        if !self.settle(idx) {
            self.ready_queue.push_back(idx);
        }
        Ok(StepOutcome::Dispatched(segment))
    }

    /// Best ready process by the discipline's rule chain.
    fn select_ready(&self) -> Option<usize> {
        let engine = self.rule_engine.as_ref()?;
        let clock = self.clock;
        let ready = self
            .processes
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_ready_at(clock))
            .map(|(idx, _)| idx);
        engine.select_best(&self.processes, ready)
    }

    /// Pushes every process that has arrived by now into the ready queue.
    fn admit_arrivals(&mut self) {
        let clock = self.clock;
        self.admit_where(|arrival| arrival <= clock);
    }

    /// Admits, in (arrival, id) order, the not yet queued processes whose
    /// arrival satisfies `arrived`.
    fn admit_where(&mut self, arrived: impl Fn(Ticks) -> bool) {
        while let Some(&idx) = self.arrival_order.get(self.admitted) {
            if !arrived(self.processes[idx].arrival_time) {
                break;
            }
            trace!("t={} {} enqueued", self.clock, self.processes[idx].id);
            self.ready_queue.push_back(idx);
            self.admitted += 1;
        }
    }

    /// Earliest arrival still in the future.
    fn next_arrival(&self) -> Option<Ticks> {
        self.processes
            .iter()
            .filter(|p| p.remaining() > 0 && p.arrival_time > self.clock)
            .map(|p| p.arrival_time)
            .min()
    }

    fn idle_until_next_arrival(&mut self) -> Result<StepOutcome, SimError> {
        let from = self.clock;
        match self.next_arrival() {
            Some(to) => {
                debug!("t={from} CPU idle until t={to}");
                self.clock = to;
                Ok(StepOutcome::Idle { from, to })
            }
            None => Err(self.stalled()),
        }
    }

    /// Runs a process for `units` ticks from the current clock.
    fn dispatch(&mut self, idx: usize, units: Ticks) -> TimelineSegment {
        let start = self.clock;
        let process = &mut self.processes[idx];
        process.execute(start, units);
        self.clock = start + units;
        self.last_dispatched = Some(idx);

        trace!(
            "t={start}..{} {} ran (remaining {})",
            self.clock,
            process.id,
            process.remaining()
        );
        TimelineSegment::new(process.id.clone(), start, self.clock)
    }

    /// Completes or releases a process after its dispatch.
    ///
    /// Returns `true` if the process completed.
    fn settle(&mut self, idx: usize) -> bool {
        let clock = self.clock;
        let process = &mut self.processes[idx];
        if process.remaining() > 0 {
            process.release();
            return false;
        }

        process.complete(clock);
        debug!("t={clock} {} completed", process.id);
        self.remaining_count -= 1;
        true
    }

    fn stalled(&self) -> SimError {
        SimError::SimulationStalled {
            clock: self.clock,
            pending: self.remaining_count,
        }
    }
}

/// Runs a complete simulation in one call.
///
/// The records are validated, reset, and advanced in place; they are
/// returned annotated inside the output.
pub fn simulate(
    processes: Vec<ProcessRecord>,
    discipline: Discipline,
    quantum: Option<Ticks>,
) -> Result<SimulationOutput, SimError> {
    Simulation::new(processes, discipline, quantum)?.run()
}
