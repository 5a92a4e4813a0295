use crate::commands::{require_selected_program, require_session, status_badge};
use crate::error::CliError;
use chrono::Utc;
use pdl_api::ApiClient;
use pdl_core::status::{self, OutcomeFieldSet, aggregate};
use pdl_core::types::{EvaluationId, EvaluationRecord, NewEvaluation, OutcomeUpdate};
use pdl_store::{SelectedEvaluation, StateStore};

#[derive(Debug, Clone, clap::Args)]
pub struct SubmitArgs {
    /// Training session date, e.g. 18/03/2024
    #[arg(long)]
    pub session_date: String,
    /// Topic of the day
    #[arg(long)]
    pub topic: String,
    /// Key learnings from the session
    #[arg(long)]
    pub learnings: String,
    /// Commitments, objectives and goals
    #[arg(long)]
    pub commitments: String,
    /// Recommendation score, 0-10
    #[arg(long)]
    pub score: Option<u8>,
    /// Free-form general feedback
    #[arg(long)]
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct OutcomeArgs {
    #[arg(long)]
    pub action_feedback: Option<String>,
    #[arg(long)]
    pub actions_not_taken: Option<String>,
    #[arg(long)]
    pub actions_not_taken_reason: Option<String>,
    #[arg(long)]
    pub completed_impact: Option<String>,
    #[arg(long)]
    pub not_completed_impact: Option<String>,
    #[arg(long)]
    pub learning_notes: Option<String>,
}

fn print_records(records: &[EvaluationRecord]) {
    for record in records {
        let badge = status_badge(status::classify(record, OutcomeFieldSet::Standard));
        println!(
            "{:>5}  {}  {}  [{badge}]",
            record.id, record.session_date, record.topic
        );
    }
    let stats = aggregate(records);
    println!(
        "{} total: {} pending, {} completed",
        stats.total, stats.pending, stats.completed
    );
}

pub async fn list(client: &ApiClient, store: &StateStore, mine: bool) -> Result<(), CliError> {
    let session = require_session(store)?;
    if mine {
        let records = pdl_api::evaluations::evaluations_by_user(client, session.user_id).await?;
        if records.is_empty() {
            println!("No evaluations recorded yet");
            return Ok(());
        }
        print_records(&records);
        return Ok(());
    }

    let selected = require_selected_program(store)?;
    let programs = pdl_api::programs::list_company_programs(client, session.company_id).await?;
    if let Some(program) = programs.iter().find(|p| p.id == selected.id) {
        if program.is_finalized() {
            println!("{} is finalized - statistics reset to zero", program.name);
            println!("0 total: 0 pending, 0 completed");
            return Ok(());
        }
    }
    let records = pdl_api::evaluations::evaluations_by_program(client, selected.id).await?;
    if records.is_empty() {
        println!("No evaluations recorded for {}", selected.name);
        return Ok(());
    }
    print_records(&records);
    Ok(())
}

pub async fn submit(client: &ApiClient, store: &StateStore, args: SubmitArgs) -> Result<(), CliError> {
    require_session(store)?;
    let selected = require_selected_program(store)?;
    let input = NewEvaluation {
        program_id: selected.id,
        session_date: args.session_date,
        topic: args.topic,
        learnings: args.learnings,
        commitments: args.commitments,
        recommendation_score: args.score,
        general_feedback: args.feedback,
    };
    let created = pdl_api::evaluations::create_evaluation(client, &input).await?;
    println!(
        "Evaluation {} recorded for {} - outcome step stays pending until filled",
        created.id, selected.name
    );
    Ok(())
}

fn merge_outcomes(record: &EvaluationRecord, args: OutcomeArgs) -> OutcomeUpdate {
    // The server replaces all six fields, so unset flags carry the current
    // values forward instead of blanking them.
    OutcomeUpdate {
        action_feedback: args.action_feedback.or_else(|| record.action_feedback.clone()),
        actions_not_taken: args
            .actions_not_taken
            .or_else(|| record.actions_not_taken.clone()),
        actions_not_taken_reason: args
            .actions_not_taken_reason
            .or_else(|| record.actions_not_taken_reason.clone()),
        completed_impact: args
            .completed_impact
            .or_else(|| record.completed_impact.clone()),
        not_completed_impact: args
            .not_completed_impact
            .or_else(|| record.not_completed_impact.clone()),
        learning_notes: args.learning_notes.or_else(|| record.learning_notes.clone()),
    }
}

pub async fn outcomes(
    client: &ApiClient,
    store: &StateStore,
    id: EvaluationId,
    args: OutcomeArgs,
) -> Result<(), CliError> {
    require_session(store)?;
    let selected = require_selected_program(store)?;
    let records = pdl_api::evaluations::evaluations_by_program(client, selected.id).await?;
    let record = records
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| CliError::NotFound {
            message: format!(
                "evaluation {id} not found in {}. Run `pdl evaluations` to list them",
                selected.name
            ),
        })?;

    let is_edit = status::filled_outcome_count(record, OutcomeFieldSet::Standard) > 0;
    let existing = OutcomeUpdate {
        action_feedback: record.action_feedback.clone(),
        actions_not_taken: record.actions_not_taken.clone(),
        actions_not_taken_reason: record.actions_not_taken_reason.clone(),
        completed_impact: record.completed_impact.clone(),
        not_completed_impact: record.not_completed_impact.clone(),
        learning_notes: record.learning_notes.clone(),
    };
    store.set_selected_evaluation(&SelectedEvaluation {
        id: record.id,
        program_id: record.program_id,
        program_name: selected.name.clone(),
        topic: record.topic.clone(),
        session_date: record.session_date.clone(),
        learnings: record.learnings.clone(),
        commitments: record.commitments.clone(),
        company_name: selected.company_name.clone(),
        selected_at: Utc::now(),
        is_edit,
        existing_data: is_edit.then_some(existing),
    })?;

    let payload = merge_outcomes(record, args);
    let updated = pdl_api::evaluations::update_outcomes(client, id, &payload).await?;
    store.clear_selected_evaluation()?;

    let badge = status_badge(status::classify(&updated, OutcomeFieldSet::Standard));
    let verb = if is_edit { "updated" } else { "saved" };
    println!("Actions and results {verb} for evaluation {id} [{badge}]");
    println!(
        "Back to {}",
        pdl_core::slug::detail_path(
            Some(&selected.company_name),
            Some(&selected.name),
            selected.id
        )
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdl_core::types::{ProgramId, UserId};

    fn record() -> EvaluationRecord {
        EvaluationRecord {
            id: EvaluationId::new(7),
            user_id: UserId::new(10),
            program_id: ProgramId::new(5),
            session_date: "18/03/2024".to_string(),
            topic: "Feedback".to_string(),
            learnings: "Escuta".to_string(),
            commitments: "1:1".to_string(),
            action_feedback: Some("feito".to_string()),
            actions_not_taken: None,
            actions_not_taken_reason: None,
            completed_impact: Some("impacto".to_string()),
            not_completed_impact: None,
            learning_notes: None,
            recommendation_score: None,
            general_feedback: None,
            active: true,
            created_at: None,
            updated_at: None,
        }
    }

    fn empty_args() -> OutcomeArgs {
        OutcomeArgs {
            action_feedback: None,
            actions_not_taken: None,
            actions_not_taken_reason: None,
            completed_impact: None,
            not_completed_impact: None,
            learning_notes: None,
        }
    }

    #[test]
    fn merge_keeps_existing_values_for_unset_flags() {
        let merged = merge_outcomes(&record(), empty_args());
        assert_eq!(merged.action_feedback.as_deref(), Some("feito"));
        assert_eq!(merged.completed_impact.as_deref(), Some("impacto"));
        assert!(merged.actions_not_taken.is_none());
    }

    #[test]
    fn merge_prefers_new_values() {
        let mut args = empty_args();
        args.action_feedback = Some("revisado".to_string());
        args.learning_notes = Some("nota nova".to_string());
        let merged = merge_outcomes(&record(), args);
        assert_eq!(merged.action_feedback.as_deref(), Some("revisado"));
        assert_eq!(merged.learning_notes.as_deref(), Some("nota nova"));
        assert_eq!(merged.completed_impact.as_deref(), Some("impacto"));
    }
}
