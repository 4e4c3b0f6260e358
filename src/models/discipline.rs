//! Scheduling disciplines.
//!
//! | Discipline | Preemptive | Selection key |
//! |------------|-----------|---------------|
//! | FCFS | no | arrival time |
//! | SJF | no | burst time |
//! | SRTF | every tick | remaining time |
//! | PRIORITY_NONPREEMPTIVE | no | priority number |
//! | PRIORITY_PREEMPTIVE | every tick | priority number |
//! | ROUND_ROBIN | per quantum | FIFO ready queue |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A CPU scheduling discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Discipline {
    /// First Come First Served.
    #[serde(rename = "FCFS")]
    Fcfs,
    /// Shortest Job First (non-preemptive).
    #[serde(rename = "SJF")]
    Sjf,
    /// Shortest Remaining Time First.
    #[serde(rename = "SRTF")]
    Srtf,
    /// Priority, run to completion once started.
    #[serde(rename = "PRIORITY_NONPREEMPTIVE", alias = "PRIORITY_NP")]
    PriorityNonPreemptive,
    /// Priority, re-evaluated every tick.
    #[serde(rename = "PRIORITY_PREEMPTIVE", alias = "PRIORITY_P")]
    PriorityPreemptive,
    /// Round Robin with a fixed quantum.
    #[serde(rename = "ROUND_ROBIN", alias = "RR")]
    RoundRobin,
}

impl Discipline {
    /// Every discipline, in declaration order.
    pub const ALL: [Discipline; 6] = [
        Discipline::Fcfs,
        Discipline::Sjf,
        Discipline::Srtf,
        Discipline::PriorityNonPreemptive,
        Discipline::PriorityPreemptive,
        Discipline::RoundRobin,
    ];

    /// Canonical selector name.
    pub fn name(&self) -> &'static str {
        match self {
            Discipline::Fcfs => "FCFS",
            Discipline::Sjf => "SJF",
            Discipline::Srtf => "SRTF",
            Discipline::PriorityNonPreemptive => "PRIORITY_NONPREEMPTIVE",
            Discipline::PriorityPreemptive => "PRIORITY_PREEMPTIVE",
            Discipline::RoundRobin => "ROUND_ROBIN",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Discipline::Fcfs => "First Come First Served",
            Discipline::Sjf => "Shortest Job First",
            Discipline::Srtf => "Shortest Remaining Time First",
            Discipline::PriorityNonPreemptive => "Priority (non-preemptive)",
            Discipline::PriorityPreemptive => "Priority (preemptive)",
            Discipline::RoundRobin => "Round Robin",
        }
    }

    /// Whether the selection is re-evaluated on every tick.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Discipline::Srtf | Discipline::PriorityPreemptive)
    }

    /// Whether a time quantum must be supplied.
    pub fn requires_quantum(&self) -> bool {
        matches!(self, Discipline::RoundRobin)
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a discipline selector is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDiscipline(pub String);

impl fmt::Display for UnknownDiscipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown scheduling discipline '{}' (expected one of FCFS, SJF, SRTF, \
             PRIORITY_NP, PRIORITY_P, RR)",
            self.0
        )
    }
}

impl std::error::Error for UnknownDiscipline {}

impl FromStr for Discipline {
    type Err = UnknownDiscipline;

    /// Parses a selector, case-insensitively, accepting `-` for `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_uppercase().replace('-', "_");
        match key.as_str() {
            "FCFS" => Ok(Discipline::Fcfs),
            "SJF" => Ok(Discipline::Sjf),
            "SRTF" => Ok(Discipline::Srtf),
            "PRIORITY_NP" | "PRIORITY_NONPREEMPTIVE" | "PRIORITY_NON_PREEMPTIVE" => {
                Ok(Discipline::PriorityNonPreemptive)
            }
            "PRIORITY_P" | "PRIORITY_PREEMPTIVE" => Ok(Discipline::PriorityPreemptive),
            "RR" | "ROUND_ROBIN" => Ok(Discipline::RoundRobin),
            _ => Err(UnknownDiscipline(s.to_string())),
        }
    }
}
