//! Simulation request (run configuration).
//!
//! A request bundles everything one run needs: the discipline, the
//! quantum, and the process descriptors. It is the unit loaded from a JSON
//! workload file:
//!
//! ```json
//! {
//!   "discipline": "ROUND_ROBIN",
//!   "quantum": 2,
//!   "processes": [
//!     { "id": "P1", "arrival_time": 0, "burst_time": 5 },
//!     { "arrival_time": 1, "burst_time": 3, "priority": 2 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::{Simulation, SimulationOutput};
use crate::error::SimError;
use crate::models::{records_from_specs, Discipline, ProcessRecord, ProcessSpec, Ticks};

/// Input container for a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Scheduling discipline.
    pub discipline: Discipline,
    /// Time quantum (Round Robin only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<Ticks>,
    /// Process descriptors, in input order.
    #[serde(default)]
    pub processes: Vec<ProcessSpec>,
}

impl SimulationRequest {
    /// Creates an empty request.
    pub fn new(discipline: Discipline) -> Self {
        Self {
            discipline,
            quantum: None,
            processes: Vec::new(),
        }
    }

    /// Parses a request from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Sets the discipline.
    pub fn with_discipline(mut self, discipline: Discipline) -> Self {
        self.discipline = discipline;
        self
    }

    /// Sets the time quantum.
    pub fn with_quantum(mut self, quantum: Ticks) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Adds a process descriptor.
    pub fn with_process(mut self, process: ProcessSpec) -> Self {
        self.processes.push(process);
        self
    }

    /// Adds several process descriptors.
    pub fn with_processes(mut self, processes: impl IntoIterator<Item = ProcessSpec>) -> Self {
        self.processes.extend(processes);
        self
    }

    /// Engine records for the descriptors, with default IDs assigned.
    pub fn records(&self) -> Vec<ProcessRecord> {
        records_from_specs(&self.processes)
    }

    /// Builds a validated simulation at t=0.
    pub fn simulation(&self) -> Result<Simulation, SimError> {
        Simulation::new(self.records(), self.discipline, self.quantum)
    }

    /// Runs the request to completion.
    pub fn run(&self) -> Result<SimulationOutput, SimError> {
        self.simulation()?.run()
    }
}
