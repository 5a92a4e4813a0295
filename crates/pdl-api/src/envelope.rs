//! Tolerant response envelopes. The deployed API is inconsistent about
//! wrapping: lists arrive either as `{"data": [...]}` or as a bare array,
//! and evaluation lists may omit the `evaluations` key entirely.

use pdl_core::types::EvaluationRecord;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Wrapped { data: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListEnvelope<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(items) => items,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EvaluationsEnvelope {
    #[serde(default)]
    pub evaluations: Vec<EvaluationRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdl_core::types::Company;

    #[test]
    fn decodes_wrapped_list() {
        let body = r#"{"data": [{"id": 1, "name": "IC2 Evolutiva"}]}"#;
        let envelope: ListEnvelope<Company> = serde_json::from_str(body).unwrap();
        let items = envelope.into_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "IC2 Evolutiva");
    }

    #[test]
    fn decodes_bare_list() {
        let body = r#"[{"id": 1, "name": "IC2 Evolutiva"}, {"id": 2, "name": "Outra"}]"#;
        let envelope: ListEnvelope<Company> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.into_items().len(), 2);
    }

    #[test]
    fn missing_evaluations_key_decodes_as_empty() {
        let envelope: EvaluationsEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.evaluations.is_empty());
    }

    #[test]
    fn decodes_evaluation_records_with_sparse_outcomes() {
        let body = r#"{"evaluations": [{
            "id": 7,
            "userId": 10,
            "programId": 5,
            "sessionDate": "2024-03-18",
            "topic": "Feedback",
            "learnings": "Escuta ativa",
            "commitments": "1:1 semanal",
            "actionFeedback": "feito"
        }]}"#;
        let envelope: EvaluationsEnvelope = serde_json::from_str(body).unwrap();
        let record = &envelope.evaluations[0];
        assert_eq!(record.action_feedback.as_deref(), Some("feito"));
        assert!(record.actions_not_taken.is_none());
        assert!(record.active);
    }
}
