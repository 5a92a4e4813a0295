pub mod auth;
pub mod companies;
pub mod evaluations;
pub mod programs;
pub mod report;

use crate::error::CliError;
use owo_colors::OwoColorize;
use pdl_core::CompletionStatus;
use pdl_store::{SelectedProgram, SessionState, StateStore};

/// Missing cached context never crashes a command; it resolves to an error
/// that points at the command rebuilding that context.
pub fn require_session(store: &StateStore) -> Result<SessionState, CliError> {
    store
        .session()?
        .ok_or_else(|| CliError::MissingContext {
            message: "not logged in. Run `pdl login` first".to_string(),
        })
}

pub fn require_selected_program(store: &StateStore) -> Result<SelectedProgram, CliError> {
    store
        .selected_program()?
        .ok_or_else(|| CliError::MissingContext {
            message: "no program selected. Run `pdl programs`, then `pdl select-program <id>`"
                .to_string(),
        })
}

pub fn status_badge(status: CompletionStatus) -> String {
    match status {
        CompletionStatus::Completed => format!("{}", "completed".green()),
        CompletionStatus::Pending => format!("{}", "pending".yellow()),
    }
}
