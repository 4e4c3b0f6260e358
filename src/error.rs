//! Error taxonomy for simulation runs.

use std::fmt;

use crate::models::Ticks;
use crate::validation::ValidationError;

/// Errors raised by the simulation engine and the metrics reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Input rejected before any simulation state was built.
    InvalidInput(Vec<ValidationError>),
    /// The engine could not make progress although work remains.
    SimulationStalled {
        /// Clock value when progress stopped.
        clock: Ticks,
        /// Processes still holding work.
        pending: usize,
    },
    /// Metrics requested for a process that never completed.
    IncompleteData {
        /// Offending process.
        process_id: String,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidInput(errors) => {
                write!(f, "invalid input: ")?;
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{e}")?;
                }
                Ok(())
            }
            SimError::SimulationStalled { clock, pending } => write!(
                f,
                "simulation stalled at t={clock} with {pending} unfinished process(es)"
            ),
            SimError::IncompleteData { process_id } => {
                write!(f, "process '{process_id}' has no completion time")
            }
        }
    }
}

impl std::error::Error for SimError {}

impl From<Vec<ValidationError>> for SimError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SimError::InvalidInput(errors)
    }
}
