//! Local validation of the creation step. Validation failures are surfaced
//! inline by the caller and never sent to the API.

use crate::error::ValidationError;
use crate::types::NewEvaluation;

const MAX_RECOMMENDATION_SCORE: u8 = 10;

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField { field })
    } else {
        Ok(())
    }
}

/// Check the four mandatory creation fields and the optional score range.
pub fn validate_new_evaluation(input: &NewEvaluation) -> Result<(), ValidationError> {
    require("sessionDate", &input.session_date)?;
    require("topic", &input.topic)?;
    require("learnings", &input.learnings)?;
    require("commitments", &input.commitments)?;
    if let Some(score) = input.recommendation_score {
        if score > MAX_RECOMMENDATION_SCORE {
            return Err(ValidationError::ScoreOutOfRange { value: score });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProgramId;

    fn input() -> NewEvaluation {
        NewEvaluation {
            program_id: ProgramId::new(5),
            session_date: "2024-03-18".to_string(),
            topic: "Delegacao".to_string(),
            learnings: "Delegar com contexto".to_string(),
            commitments: "Delegar dois projetos".to_string(),
            recommendation_score: None,
            general_feedback: None,
        }
    }

    #[test]
    fn accepts_complete_input() {
        assert!(validate_new_evaluation(&input()).is_ok());
    }

    #[test]
    fn rejects_blank_required_fields() {
        let mut bad = input();
        bad.topic = "   ".to_string();
        assert_eq!(
            validate_new_evaluation(&bad),
            Err(ValidationError::MissingField { field: "topic" })
        );

        let mut bad = input();
        bad.learnings = String::new();
        assert_eq!(
            validate_new_evaluation(&bad),
            Err(ValidationError::MissingField { field: "learnings" })
        );
    }

    #[test]
    fn rejects_out_of_range_score() {
        let mut bad = input();
        bad.recommendation_score = Some(11);
        assert_eq!(
            validate_new_evaluation(&bad),
            Err(ValidationError::ScoreOutOfRange { value: 11 })
        );
        let mut ok = input();
        ok.recommendation_score = Some(10);
        assert!(validate_new_evaluation(&ok).is_ok());
    }
}
