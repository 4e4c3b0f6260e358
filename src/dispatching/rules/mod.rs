//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Order-based**: FCFS
//! - **Work-based**: SJF, SRTF
//! - **Priority**: PRIORITY
//!
//! # Score Convention
//! All rules return lower scores for processes that should run first.

use super::{DispatchingRule, RuleScore};
use crate::models::ProcessRecord;

// ======================== Order-based rules ========================

/// First Come First Served.
///
/// Prioritizes processes that arrived earlier.
#[derive(Debug, Clone, Copy)]
pub struct Fcfs;

impl DispatchingRule for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn evaluate(&self, process: &ProcessRecord) -> RuleScore {
        process.arrival_time
    }

    fn description(&self) -> &'static str {
        "First Come First Served"
    }
}

// ======================== Work-based rules ========================

/// Shortest Job First.
///
/// Prioritizes processes with the smallest total burst. Minimizes mean
/// waiting time among non-preemptive orderings of a fixed ready set.
#[derive(Debug, Clone, Copy)]
pub struct Sjf;

impl DispatchingRule for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(&self, process: &ProcessRecord) -> RuleScore {
        process.burst_time
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

/// Shortest Remaining Time First.
///
/// Prioritizes processes closest to completion.
#[derive(Debug, Clone, Copy)]
pub struct Srtf;

impl DispatchingRule for Srtf {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn evaluate(&self, process: &ProcessRecord) -> RuleScore {
        process.remaining()
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time First"
    }
}

// ======================== Priority-based rule ========================

/// Priority number rule.
///
/// Lower `priority` values run first.
#[derive(Debug, Clone, Copy)]
pub struct Priority;

impl DispatchingRule for Priority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, process: &ProcessRecord) -> RuleScore {
        process.priority as RuleScore
    }

    fn description(&self) -> &'static str {
        "Process Priority"
    }
}
