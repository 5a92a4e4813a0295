pub mod error;
pub mod report;
pub mod slug;
pub mod status;
pub mod validation;

pub mod types;

pub use crate::error::ValidationError;
pub use crate::status::{CompletionStatus, EvaluationStats, OutcomeFieldSet};
