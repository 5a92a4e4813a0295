//! Report content contract: the fixed section order exported as PDF.
//!
//! This module decides *what* appears in the report and in which order; the
//! renderer in `pdl-report` decides how it is laid out on the page. Missing
//! optional fields are omitted entirely rather than shown blank.

use crate::slug::slugify;
use crate::types::EvaluationRecord;
use chrono::NaiveDate;

pub const REPORT_TITLE: &str = "PDL EVALUATION REPORT";
pub const REPORT_SUBTITLE: &str = "IC2 Evolutiva";
pub const REPORT_FOOTER: &str = "IC2 Evolutiva - PDL Evaluation Report";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub label: String,
    pub body: String,
}

/// Everything the renderer needs, in final order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    pub subtitle: String,
    pub generated_on: NaiveDate,
    pub program_name: String,
    pub session_date: String,
    pub topic: String,
    pub learnings: String,
    pub commitments: String,
    pub outcome_sections: Vec<ReportSection>,
    pub recommendation_score: Option<u8>,
    pub general_feedback: Option<String>,
    pub footer: String,
}

fn push_if_present(sections: &mut Vec<ReportSection>, label: &str, value: Option<&str>) {
    if let Some(body) = value {
        if !body.trim().is_empty() {
            sections.push(ReportSection {
                label: label.to_string(),
                body: body.to_string(),
            });
        }
    }
}

/// Assemble the report for one record.
pub fn build_report(
    program_name: &str,
    record: &EvaluationRecord,
    generated_on: NaiveDate,
) -> ReportDocument {
    let mut outcome_sections = Vec::new();
    push_if_present(
        &mut outcome_sections,
        "Feedback on Actions Taken",
        record.action_feedback.as_deref(),
    );
    push_if_present(
        &mut outcome_sections,
        "Actions Not Taken",
        record.actions_not_taken.as_deref(),
    );
    push_if_present(
        &mut outcome_sections,
        "Reason for Actions Not Taken",
        record.actions_not_taken_reason.as_deref(),
    );
    push_if_present(
        &mut outcome_sections,
        "Impact of Completed Activities",
        record.completed_impact.as_deref(),
    );
    push_if_present(
        &mut outcome_sections,
        "Impact of Activities Not Completed",
        record.not_completed_impact.as_deref(),
    );
    push_if_present(
        &mut outcome_sections,
        "Learning Notes",
        record.learning_notes.as_deref(),
    );

    ReportDocument {
        title: REPORT_TITLE.to_string(),
        subtitle: REPORT_SUBTITLE.to_string(),
        generated_on,
        program_name: program_name.to_string(),
        session_date: record.session_date.clone(),
        topic: record.topic.clone(),
        learnings: record.learnings.clone(),
        commitments: record.commitments.clone(),
        outcome_sections,
        recommendation_score: record.recommendation_score,
        general_feedback: record
            .general_feedback
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .map(ToString::to_string),
        footer: REPORT_FOOTER.to_string(),
    }
}

/// Download file name: slugified program name plus the session date with
/// path separators flattened.
pub fn report_file_name(program_name: &str, session_date: &str) -> String {
    let date = session_date.replace('/', "-");
    format!("pdl-report-{}-{}.pdf", slugify(program_name), date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EvaluationId, ProgramId, UserId};

    fn record() -> EvaluationRecord {
        EvaluationRecord {
            id: EvaluationId::new(3),
            user_id: UserId::new(10),
            program_id: ProgramId::new(5),
            session_date: "18/03/2024".to_string(),
            topic: "Feedback eficaz".to_string(),
            learnings: "Escuta ativa".to_string(),
            commitments: "Aplicar 1:1 semanal".to_string(),
            action_feedback: Some("Feedback dado ao time".to_string()),
            actions_not_taken: None,
            actions_not_taken_reason: Some("   ".to_string()),
            completed_impact: Some("Time mais engajado".to_string()),
            not_completed_impact: None,
            learning_notes: None,
            recommendation_score: Some(9),
            general_feedback: Some("Excelente programa".to_string()),
            active: true,
            created_at: None,
            updated_at: None,
        }
    }

    fn generated_on() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 2).unwrap()
    }

    #[test]
    fn omits_empty_and_whitespace_outcome_sections() {
        let doc = build_report("Turma Alfa", &record(), generated_on());
        let labels: Vec<&str> = doc
            .outcome_sections
            .iter()
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(
            labels,
            vec!["Feedback on Actions Taken", "Impact of Completed Activities"]
        );
    }

    #[test]
    fn keeps_fixed_section_order() {
        let mut r = record();
        r.learning_notes = Some("notas".to_string());
        r.actions_not_taken = Some("adiado".to_string());
        let doc = build_report("Turma Alfa", &r, generated_on());
        let labels: Vec<&str> = doc
            .outcome_sections
            .iter()
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(
            labels,
            vec![
                "Feedback on Actions Taken",
                "Actions Not Taken",
                "Impact of Completed Activities",
                "Learning Notes"
            ]
        );
    }

    #[test]
    fn carries_score_and_general_feedback_when_present() {
        let doc = build_report("Turma Alfa", &record(), generated_on());
        assert_eq!(doc.recommendation_score, Some(9));
        assert_eq!(doc.general_feedback.as_deref(), Some("Excelente programa"));

        let mut r = record();
        r.recommendation_score = None;
        r.general_feedback = Some("  ".to_string());
        let doc = build_report("Turma Alfa", &r, generated_on());
        assert_eq!(doc.recommendation_score, None);
        assert_eq!(doc.general_feedback, None);
    }

    #[test]
    fn file_name_slugs_program_and_flattens_date() {
        assert_eq!(
            report_file_name("Turma Alfa", "18/03/2024"),
            "pdl-report-turma-alfa-18-03-2024.pdf"
        );
    }
}
