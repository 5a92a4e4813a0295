//! Completion classification for evaluation records.
//!
//! Status is derived from outcome-field fill counts and never stored, so
//! every surface that lists, filters, or summarizes records must go through
//! this module to keep per-item badges consistent with aggregate counts.

use crate::types::{EvaluationRecord, TrainingProgram};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum number of filled outcome fields for a record to count as
/// completed. Partial-but-substantive progress counts: some outcome
/// questions are conditionally inapplicable (a justification for actions
/// not taken is irrelevant when every action was taken).
pub const COMPLETION_THRESHOLD: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionStatus {
    Pending,
    Completed,
}

impl CompletionStatus {
    pub fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Which outcome fields participate in classification.
///
/// `Standard` is the five-field rule used by listings and program detail.
/// `WithLearningNotes` additionally counts `learning_notes`; the report
/// view has historically used this six-field variant. The drift between
/// the two is preserved here, visibly chosen per call site, instead of
/// being silently reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeFieldSet {
    Standard,
    WithLearningNotes,
}

fn is_filled(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Number of filled outcome fields under the given field set.
pub fn filled_outcome_count(record: &EvaluationRecord, field_set: OutcomeFieldSet) -> usize {
    let mut fields = vec![
        record.action_feedback.as_deref(),
        record.actions_not_taken.as_deref(),
        record.actions_not_taken_reason.as_deref(),
        record.completed_impact.as_deref(),
        record.not_completed_impact.as_deref(),
    ];
    if field_set == OutcomeFieldSet::WithLearningNotes {
        fields.push(record.learning_notes.as_deref());
    }
    fields.into_iter().filter(|f| is_filled(*f)).count()
}

/// Classify a record as pending or completed.
///
/// A field counts as filled iff it is present and non-empty after trimming;
/// whitespace-only content does not count.
pub fn classify(record: &EvaluationRecord, field_set: OutcomeFieldSet) -> CompletionStatus {
    if filled_outcome_count(record, field_set) >= COMPLETION_THRESHOLD {
        CompletionStatus::Completed
    } else {
        CompletionStatus::Pending
    }
}

/// Aggregate counts for a record list. `pending + completed == total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

pub fn aggregate(records: &[EvaluationRecord]) -> EvaluationStats {
    let total = records.len();
    let completed = records
        .iter()
        .filter(|r| classify(r, OutcomeFieldSet::Standard).is_completed())
        .count();
    EvaluationStats {
        total,
        pending: total - completed,
        completed,
    }
}

/// Aggregate counts for a program's records. Finalized programs do not
/// surface actionable counts: the result is forced to zero regardless of
/// the underlying records.
pub fn aggregate_for_program(
    program: &TrainingProgram,
    records: &[EvaluationRecord],
) -> EvaluationStats {
    if program.is_finalized() {
        EvaluationStats::default()
    } else {
        aggregate(records)
    }
}
