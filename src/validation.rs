//! Input validation for simulation runs.
//!
//! Checks structural integrity of process records and run parameters
//! before any simulation state is built. Detects:
//! - Duplicate process IDs
//! - Negative arrival times
//! - Non-positive burst times
//! - Missing or non-positive quantum for Round Robin
//! - Workloads whose latest possible completion does not fit in [`Ticks`]
//!
//! All problems are collected and reported together.

use std::collections::HashSet;
use std::fmt;

use crate::models::{Discipline, ProcessRecord, Ticks};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share the same ID.
    DuplicateId,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process requires zero or negative CPU time.
    NonPositiveBurst,
    /// Round Robin requested without a quantum.
    MissingQuantum,
    /// A quantum of zero or less was supplied.
    NonPositiveQuantum,
    /// The last arrival plus the total burst exceeds `Ticks::MAX`.
    HorizonOverflow,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates the input of a simulation run.
///
/// Checks:
/// 1. No duplicate process IDs
/// 2. Every `arrival_time >= 0`
/// 3. Every `burst_time > 0`
/// 4. Round Robin has a quantum, and it is positive
/// 5. `max(arrival) + sum(burst)` fits in [`Ticks`], which bounds the clock
///    of every discipline
///
/// A quantum passed to any other discipline is ignored.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    processes: &[ProcessRecord],
    discipline: Discipline,
    quantum: Option<Ticks>,
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut ids = HashSet::new();
    for p in processes {
        if !ids.insert(p.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", p.id),
            ));
        }

        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!(
                    "Process '{}' has negative arrival time {}",
                    p.id, p.arrival_time
                ),
            ));
        }

        if p.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!(
                    "Process '{}' has non-positive burst time {}",
                    p.id, p.burst_time
                ),
            ));
        }
    }

    if horizon(processes).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::HorizonOverflow,
            format!(
                "Latest arrival plus total burst of {} process(es) exceeds {}",
                processes.len(),
                Ticks::MAX
            ),
        ));
    }

    if discipline.requires_quantum() {
        match quantum {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::MissingQuantum,
                format!("{discipline} requires a time quantum"),
            )),
            Some(q) if q <= 0 => errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveQuantum,
                format!("Time quantum must be positive, got {q}"),
            )),
            Some(_) => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Latest time any schedule can end, or `None` on overflow.
fn horizon(processes: &[ProcessRecord]) -> Option<Ticks> {
    let last_arrival = processes
        .iter()
        .map(|p| p.arrival_time.max(0))
        .max()
        .unwrap_or(0);
    processes
        .iter()
        .try_fold(last_arrival, |end, p| end.checked_add(p.burst_time.max(0)))
}
