use crate::types::ids::{EvaluationId, ProgramId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One user's submission for one training session within a program.
///
/// The four creation fields (`session_date`, `topic`, `learnings`,
/// `commitments`) are always non-empty for any record that exists
/// server-side. Outcome fields start empty and are filled later, possibly
/// repeatedly. Completion status is derived, never stored (see
/// [`crate::status`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRecord {
    pub id: EvaluationId,
    pub user_id: UserId,
    pub program_id: ProgramId,
    pub session_date: String,
    pub topic: String,
    pub learnings: String,
    pub commitments: String,
    #[serde(default)]
    pub action_feedback: Option<String>,
    #[serde(default)]
    pub actions_not_taken: Option<String>,
    #[serde(default)]
    pub actions_not_taken_reason: Option<String>,
    #[serde(default)]
    pub completed_impact: Option<String>,
    #[serde(default)]
    pub not_completed_impact: Option<String>,
    #[serde(default)]
    pub learning_notes: Option<String>,
    #[serde(default)]
    pub recommendation_score: Option<u8>,
    #[serde(default)]
    pub general_feedback: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

/// Payload for the initial submission step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvaluation {
    pub program_id: ProgramId,
    pub session_date: String,
    pub topic: String,
    pub learnings: String,
    pub commitments: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_feedback: Option<String>,
}

/// Payload for the outcome step. Submission replaces all six outcome
/// fields on the server (overwrite, not merge), so every field is carried
/// even when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeUpdate {
    #[serde(default)]
    pub action_feedback: Option<String>,
    #[serde(default)]
    pub actions_not_taken: Option<String>,
    #[serde(default)]
    pub actions_not_taken_reason: Option<String>,
    #[serde(default)]
    pub completed_impact: Option<String>,
    #[serde(default)]
    pub not_completed_impact: Option<String>,
    #[serde(default)]
    pub learning_notes: Option<String>,
}
