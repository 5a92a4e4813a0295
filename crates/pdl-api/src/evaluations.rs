use crate::client::ApiClient;
use crate::envelope::EvaluationsEnvelope;
use crate::error::ApiError;
use pdl_core::types::{EvaluationId, EvaluationRecord, NewEvaluation, OutcomeUpdate, ProgramId, UserId};
use pdl_core::validation::validate_new_evaluation;
use serde::Deserialize;
use tracing::warn;

/// Page size observed in deployed clients; the portal never paginates past
/// the first page.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEvaluation {
    pub id: EvaluationId,
}

/// Create a record from the initial submission step. The four mandatory
/// fields are validated locally; an invalid payload never reaches the wire.
pub async fn create_evaluation(
    client: &ApiClient,
    input: &NewEvaluation,
) -> Result<CreatedEvaluation, ApiError> {
    validate_new_evaluation(input)?;
    client.post_json("/api/evaluations", input).await
}

/// All records for one program, first page only (default size 100).
pub async fn evaluations_by_program(
    client: &ApiClient,
    program_id: ProgramId,
) -> Result<Vec<EvaluationRecord>, ApiError> {
    let path = format!("/api/evaluations/program/{program_id}");
    let params = [
        ("limit", DEFAULT_PAGE_SIZE.to_string()),
        ("offset", "0".to_string()),
    ];
    let envelope: EvaluationsEnvelope = client.get_json(&path, &params).await?;
    Ok(envelope.evaluations)
}

/// All records for one user. When the primary endpoint fails for any reason
/// other than authentication, the results endpoint is tried once as a
/// secondary lookup before giving up.
pub async fn evaluations_by_user(
    client: &ApiClient,
    user_id: UserId,
) -> Result<Vec<EvaluationRecord>, ApiError> {
    let primary = format!("/api/evaluations/user/{user_id}");
    match client.get_json::<EvaluationsEnvelope>(&primary, &[]).await {
        Ok(envelope) => Ok(envelope.evaluations),
        Err(ApiError::Unauthorized) => Err(ApiError::Unauthorized),
        Err(err) => {
            warn!(error = %err, "primary evaluation lookup failed, trying results endpoint");
            let fallback = format!("/api/evaluations/results/{user_id}");
            let envelope: EvaluationsEnvelope = client.get_json(&fallback, &[]).await?;
            Ok(envelope.evaluations)
        }
    }
}

/// Overwrite the outcome fields of an existing record. The server replaces
/// all six fields with the payload (no merge), so resubmission is
/// idempotent.
pub async fn update_outcomes(
    client: &ApiClient,
    id: EvaluationId,
    outcomes: &OutcomeUpdate,
) -> Result<EvaluationRecord, ApiError> {
    let path = format!("/api/evaluations/{id}/outcomes");
    client.put_json(&path, outcomes).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdl_core::ValidationError;
    use url::Url;

    fn client() -> ApiClient {
        ApiClient::new(Url::parse("http://localhost:3000").unwrap()).unwrap()
    }

    #[tokio::test]
    async fn invalid_submission_is_rejected_before_any_request() {
        // Nothing listens on this address; a wire attempt would surface as
        // a network error instead of the validation error asserted here.
        let input = NewEvaluation {
            program_id: ProgramId::new(5),
            session_date: String::new(),
            topic: "Delegacao".to_string(),
            learnings: "x".to_string(),
            commitments: "y".to_string(),
            recommendation_score: None,
            general_feedback: None,
        };
        let err = create_evaluation(&client(), &input).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::MissingField {
                field: "sessionDate"
            })
        ));
    }

    #[test]
    fn outcome_update_serializes_every_field() {
        // Overwrite semantics: empty fields must be carried, not skipped.
        let json = serde_json::to_value(OutcomeUpdate::default()).unwrap();
        for key in [
            "actionFeedback",
            "actionsNotTaken",
            "actionsNotTakenReason",
            "completedImpact",
            "notCompletedImpact",
            "learningNotes",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
