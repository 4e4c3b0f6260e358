//! Simulation engine and metrics reduction.
//!
//! Provides the discrete-time scheduling engine and the reducer that turns
//! its output into scheduling metrics.
//!
//! # Algorithm
//!
//! `Simulation` advances a simulated clock one decision at a time. Ready-set
//! disciplines select through a `RuleEngine` chain (primary key, then
//! arrival, then ID); Round Robin uses an explicit FIFO queue.
//!
//! # KPI
//!
//! `SimulationReport` computes turnaround, waiting and response time per
//! process plus averages, CPU utilization, and throughput.

mod kpi;
mod request;
mod simulation;

pub use kpi::{ProcessMetrics, SimulationReport};
pub use request::SimulationRequest;
pub use simulation::{simulate, Simulation, SimulationOutput, StepOutcome};
