use crate::types::ids::{CompanyId, ProgramId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A company's named training program ("PDL"). Created and finalized
/// server-side; once `finished_at` is set the program is read-only and its
/// statistics are forced to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingProgram {
    pub id: ProgramId,
    pub name: String,
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl TrainingProgram {
    pub fn is_finalized(&self) -> bool {
        self.finished_at.is_some()
    }
}
