use crate::commands::require_session;
use crate::error::CliError;
use chrono::Utc;
use owo_colors::OwoColorize;
use pdl_api::ApiClient;
use pdl_core::slug;
use pdl_core::status::aggregate_for_program;
use pdl_core::types::{ProgramId, TrainingProgram};
use pdl_store::{SelectedProgram, StateStore};

pub async fn list(client: &ApiClient, store: &StateStore) -> Result<(), CliError> {
    let session = require_session(store)?;
    let programs = pdl_api::programs::list_company_programs(client, session.company_id).await?;
    if programs.is_empty() {
        println!("No programs available for this company");
        return Ok(());
    }
    println!("Programs of {}", session.company_name);
    for program in programs {
        let badge = if program.is_finalized() {
            format!("{}", "finalized".dimmed())
        } else {
            format!("{}", "active".green())
        };
        println!("{:>5}  {}  [{badge}]", program.id, program.name);
    }
    Ok(())
}

/// Resolve `selector` against the fresh program list: numeric ID first,
/// slug match second. Slugs are lossy, so they are only ever compared
/// against re-encoded names, never parsed.
fn resolve<'a>(selector: &str, programs: &'a [TrainingProgram]) -> Option<&'a TrainingProgram> {
    if let Ok(id) = selector.parse::<ProgramId>() {
        if let Some(found) = programs.iter().find(|p| p.id == id) {
            return Some(found);
        }
    }
    slug::match_by_slug(selector, programs, |p| &p.name)
}

pub async fn select(client: &ApiClient, store: &StateStore, selector: String) -> Result<(), CliError> {
    let session = require_session(store)?;
    let programs = pdl_api::programs::list_company_programs(client, session.company_id).await?;
    let program = resolve(&selector, &programs).ok_or_else(|| CliError::NotFound {
        message: format!("no program matches '{selector}'. Run `pdl programs` to list them"),
    })?;

    store.set_selected_program(&SelectedProgram {
        id: program.id,
        name: program.name.clone(),
        company_name: session.company_name.clone(),
        selected_at: Utc::now(),
    })?;

    println!(
        "Selected {} -> {}",
        program.name,
        slug::detail_path(Some(&session.company_name), Some(&program.name), program.id)
    );

    // Finalized programs surface no actionable counts, so the fetch is
    // skipped outright.
    if program.is_finalized() {
        println!("Program is finalized - statistics reset to zero");
        return Ok(());
    }
    let records = pdl_api::evaluations::evaluations_by_program(client, program.id).await?;
    let stats = aggregate_for_program(program, &records);
    println!(
        "{} evaluations: {} pending, {} completed",
        stats.total, stats.pending, stats.completed
    );
    Ok(())
}
