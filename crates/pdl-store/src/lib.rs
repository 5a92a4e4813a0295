pub mod error;
pub mod schema;
pub mod state;

pub use crate::error::StoreError;
pub use crate::state::{
    RememberMe, SelectedEvaluation, SelectedProgram, SessionState, StateStore,
};
