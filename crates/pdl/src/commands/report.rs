use crate::commands::{require_session, status_badge};
use crate::error::CliError;
use chrono::Utc;
use pdl_api::ApiClient;
use pdl_core::report::{build_report, report_file_name};
use pdl_core::status::{self, OutcomeFieldSet};
use pdl_core::types::EvaluationId;
use pdl_store::StateStore;
use std::path::PathBuf;

pub async fn export(
    client: &ApiClient,
    store: &StateStore,
    id: EvaluationId,
    out: Option<PathBuf>,
) -> Result<(), CliError> {
    let session = require_session(store)?;

    // Program scope first when one is selected, the user's own records
    // otherwise.
    let (records, program_name) = match store.selected_program()? {
        Some(selected) => {
            let records =
                pdl_api::evaluations::evaluations_by_program(client, selected.id).await?;
            (records, Some(selected.name))
        }
        None => {
            let records =
                pdl_api::evaluations::evaluations_by_user(client, session.user_id).await?;
            (records, None)
        }
    };
    let record = records
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| CliError::NotFound {
            message: format!("evaluation {id} not found. Run `pdl evaluations` to list them"),
        })?;
    let program_name =
        program_name.unwrap_or_else(|| format!("Program {}", record.program_id));

    // The report surface historically counts learning notes toward
    // completion, unlike the listings; keep its field set.
    let badge = status_badge(status::classify(record, OutcomeFieldSet::WithLearningNotes));

    let document = build_report(&program_name, record, Utc::now().date_naive());
    let path = out.unwrap_or_else(|| {
        PathBuf::from(report_file_name(&program_name, &record.session_date))
    });
    pdl_report::save_to(&document, &path)?;
    println!("Report written to {} [{badge}]", path.display());
    Ok(())
}
