//! Dispatching rules and rule engine for process selection.
//!
//! Provides the selection keys of the ready-set disciplines (FCFS, SJF,
//! SRTF, priority) and a rule engine that chains them with tie-breakers.
//!
//! # Usage
//!
//! ```
//! use u_cpusim::dispatching::{rules, RuleEngine, TieBreaker};
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::Srtf)
//!     .with_tie_breaker(rules::Fcfs)
//!     .with_final_tie_breaker(TieBreaker::ById);
//! ```

mod engine;
pub mod rules;

pub use engine::{RuleEngine, TieBreaker};

use crate::models::ProcessRecord;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first). Scores are exact
/// integers, so ties are detected without an epsilon.
pub type RuleScore = i64;

/// A dispatching rule that evaluates how urgently a process should run.
///
/// # Score Convention
/// **Lower score = runs first.**
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SJF", "SRTF").
    fn name(&self) -> &'static str;

    /// Evaluates a ready process.
    fn evaluate(&self, process: &ProcessRecord) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
