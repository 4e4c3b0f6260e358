//! Rule engine for multi-key dispatching.
//!
//! Chains dispatching rules sequentially: a later rule is consulted only
//! when every earlier rule ties, and a final tie-breaker settles the rest.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, DispatchingRule, RuleScore};
use crate::models::{Discipline, ProcessRecord};

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Default)]
pub enum TieBreaker {
    /// Leave the tie (stable input order decides).
    #[default]
    NextRule,
    /// Deterministic by process ID (lexicographic).
    ById,
}

/// A composable rule engine for process selection.
///
/// # Example
/// ```
/// use u_cpusim::dispatching::{rules, RuleEngine, TieBreaker};
/// use u_cpusim::models::ProcessRecord;
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::Sjf)
///     .with_tie_breaker(rules::Fcfs)
///     .with_final_tie_breaker(TieBreaker::ById);
///
/// let ready = vec![ProcessRecord::new("P1", 0, 6), ProcessRecord::new("P2", 1, 2)];
/// assert_eq!(engine.select_best(&ready, 0..ready.len()), Some(1));
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    tie_breaker: TieBreaker,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::NextRule,
        }
    }

    /// Selection chain for a discipline: its primary key, then earlier
    /// arrival, then lower ID.
    ///
    /// Returns `None` for Round Robin, which selects from a FIFO queue.
    pub fn for_discipline(discipline: Discipline) -> Option<Self> {
        let engine = match discipline {
            Discipline::Fcfs => Self::new().with_rule(rules::Fcfs),
            Discipline::Sjf => Self::new()
                .with_rule(rules::Sjf)
                .with_tie_breaker(rules::Fcfs),
            Discipline::Srtf => Self::new()
                .with_rule(rules::Srtf)
                .with_tie_breaker(rules::Fcfs),
            Discipline::PriorityNonPreemptive | Discipline::PriorityPreemptive => Self::new()
                .with_rule(rules::Priority)
                .with_tie_breaker(rules::Fcfs),
            Discipline::RoundRobin => return None,
        };
        Some(engine.with_final_tie_breaker(TieBreaker::ById))
    }

    /// Adds a primary rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a tie-breaking rule, consulted only when earlier rules tie.
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Orders two processes; `Less` means `a` runs first.
    pub fn compare(&self, a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
        for rule in &self.rules {
            let ord = rule.evaluate(a).cmp(&rule.evaluate(b));
            if ord != Ordering::Equal {
                return ord;
            }
        }

        match &self.tie_breaker {
            TieBreaker::NextRule => Ordering::Equal,
            TieBreaker::ById => a.id.cmp(&b.id),
        }
    }

    /// Sorts processes (highest priority first).
    ///
    /// Returns indices into the original slice.
    pub fn sort_indices(&self, processes: &[ProcessRecord]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..processes.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&processes[a], &processes[b]));
        indices
    }

    /// Returns the best of `candidates` (indices into `processes`).
    ///
    /// The earliest candidate wins exact ties.
    pub fn select_best(
        &self,
        processes: &[ProcessRecord],
        candidates: impl IntoIterator<Item = usize>,
    ) -> Option<usize> {
        candidates.into_iter().fold(None, |best, idx| match best {
            Some(b) if self.compare(&processes[idx], &processes[b]) != Ordering::Less => Some(b),
            _ => Some(idx),
        })
    }

    /// Evaluates a single process and returns the score from each rule.
    pub fn evaluate(&self, process: &ProcessRecord) -> Vec<RuleScore> {
        self.rules.iter().map(|r| r.evaluate(process)).collect()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_process(id: &str, arrival: i64, burst: i64, priority: i32) -> ProcessRecord {
        ProcessRecord::new(id, arrival, burst).with_priority(priority)
    }

    #[test]
    fn test_sjf_ordering() {
        let processes = vec![
            make_process("long", 0, 5, 0),
            make_process("short", 0, 1, 0),
            make_process("medium", 0, 3, 0),
        ];
        let engine = RuleEngine::new().with_rule(rules::Sjf);

        let indices = engine.sort_indices(&processes);
        assert_eq!(processes[indices[0]].id, "short");
        assert_eq!(processes[indices[1]].id, "medium");
        assert_eq!(processes[indices[2]].id, "long");
    }

    #[test]
    fn test_sequential_with_tie_breaker() {
        let processes = vec![make_process("B", 3, 4, 0), make_process("A", 1, 4, 0)];
        let engine = RuleEngine::new()
            .with_rule(rules::Sjf)
            .with_tie_breaker(rules::Fcfs);

        // Burst ties → earlier arrival wins
        assert_eq!(engine.select_best(&processes, 0..2), Some(1));
    }

    #[test]
    fn test_by_id_tie_breaker() {
        let processes = vec![make_process("P2", 0, 3, 1), make_process("P1", 0, 3, 1)];
        let engine = RuleEngine::for_discipline(Discipline::PriorityPreemptive).unwrap();

        let indices = engine.sort_indices(&processes);
        assert_eq!(processes[indices[0]].id, "P1");
    }

    #[test]
    fn test_without_final_tie_breaker_first_candidate_wins() {
        let processes = vec![make_process("Z", 0, 3, 0), make_process("A", 0, 3, 0)];
        let engine = RuleEngine::new().with_rule(rules::Sjf);
        assert_eq!(engine.compare(&processes[0], &processes[1]), Ordering::Equal);
        assert_eq!(engine.select_best(&processes, 0..2), Some(0));
    }

    #[test]
    fn test_priority_chain() {
        let processes = vec![
            make_process("low", 0, 1, 5),
            make_process("high", 2, 9, 1),
        ];
        let engine = RuleEngine::for_discipline(Discipline::PriorityNonPreemptive).unwrap();
        assert_eq!(engine.select_best(&processes, 0..2), Some(1));
    }

    #[test]
    fn test_round_robin_has_no_engine() {
        assert!(RuleEngine::for_discipline(Discipline::RoundRobin).is_none());
        for d in Discipline::ALL.iter().filter(|d| **d != Discipline::RoundRobin) {
            assert!(RuleEngine::for_discipline(*d).is_some());
        }
    }

    #[test]
    fn test_empty_candidates() {
        let engine = RuleEngine::new().with_rule(rules::Sjf);
        assert!(engine.sort_indices(&[]).is_empty());
        assert!(engine.select_best(&[], std::iter::empty()).is_none());
    }

    #[test]
    fn test_evaluate_scores() {
        let p = make_process("T1", 4, 3, 2);
        let engine = RuleEngine::new()
            .with_rule(rules::Sjf)
            .with_rule(rules::Fcfs)
            .with_rule(rules::Priority);

        assert_eq!(engine.evaluate(&p), vec![3, 4, 2]);
    }

    #[test]
    fn test_debug_lists_rule_names() {
        let engine = RuleEngine::for_discipline(Discipline::Srtf).unwrap();
        let dbg = format!("{engine:?}");
        assert!(dbg.contains("SRTF"));
        assert!(dbg.contains("FCFS"));
    }
}
