pub mod company;
pub mod evaluation;
pub mod ids;
pub mod program;

pub use company::Company;
pub use evaluation::{EvaluationRecord, NewEvaluation, OutcomeUpdate};
pub use ids::{CompanyId, EvaluationId, ProgramId, UserId};
pub use program::TrainingProgram;
