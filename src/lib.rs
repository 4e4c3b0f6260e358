//! CPU process scheduling simulator.
//!
//! Given a set of processes (arrival time, burst time, priority) and a
//! scheduling discipline, computes the execution timeline and the derived
//! per-process and aggregate performance metrics.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ProcessSpec`, `ProcessRecord`,
//!   `TimelineSegment`, `Timeline`, `Discipline`
//! - **`validation`**: Input integrity checks (duplicate IDs, bursts, quantum)
//! - **`dispatching`**: Selection rules (FCFS, SJF, SRTF, PRIORITY) and the
//!   rule engine that chains them with tie-breakers
//! - **`scheduler`**: The steppable `Simulation` engine and `SimulationReport`
//! - **`workload`**: Seeded random workload generation
//!
//! # Example
//!
//! ```
//! use u_cpusim::models::{Discipline, ProcessRecord};
//! use u_cpusim::scheduler::simulate;
//!
//! let processes = vec![
//!     ProcessRecord::new("P1", 0, 5),
//!     ProcessRecord::new("P2", 1, 3),
//!     ProcessRecord::new("P3", 2, 2),
//! ];
//! let output = simulate(processes, Discipline::Fcfs, None).unwrap();
//! let report = output.report().unwrap();
//! assert_eq!(report.makespan, 10);
//! assert_eq!(report.process("P3").unwrap().waiting_time, 6);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use error::SimError;
