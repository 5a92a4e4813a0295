//! Typed client-state store, the local analog of the portal's browser
//! storage. One schema per key, validated on read: a row that no longer
//! parses is logged, deleted, and reported as absent so callers fall back
//! to a safe default instead of trusting stale shapes.
//!
//! Single-process ownership is assumed; concurrent writers are unsupported.

use crate::error::StoreError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use pdl_core::types::{CompanyId, EvaluationId, OutcomeUpdate, ProgramId, UserId};
use rusqlite::{Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

const KEY_TOKEN: &str = "token";
const KEY_SESSION: &str = "session";
const KEY_SELECTED_PROGRAM: &str = "selectedProgram";
const KEY_SELECTED_EVALUATION: &str = "selectedEvaluation";
const KEY_REMEMBER_ME: &str = "rememberMe";

/// Authenticated-user context carried between commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub email: String,
    pub user_id: UserId,
    pub company_id: CompanyId,
    pub company_name: String,
    pub logged_at: DateTime<Utc>,
}

/// Program picked on the listing surface, denormalized for navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedProgram {
    pub id: ProgramId,
    pub name: String,
    pub company_name: String,
    pub selected_at: DateTime<Utc>,
}

/// Evaluation record picked for the outcome step. `existing_data` carries
/// the current outcome values when entering the edit flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedEvaluation {
    pub id: EvaluationId,
    pub program_id: ProgramId,
    pub program_name: String,
    pub topic: String,
    pub session_date: String,
    pub learnings: String,
    pub commitments: String,
    pub company_name: String,
    pub selected_at: DateTime<Utc>,
    pub is_edit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_data: Option<OutcomeUpdate>,
}

/// Remember-me record. The email is base64-encoded: reversible obfuscation
/// against shoulder-surfing a state dump, not security.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RememberMe {
    pub email_encoded: String,
    pub company: String,
    pub expires_at: DateTime<Utc>,
}

impl RememberMe {
    pub fn new(email: &str, company: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            email_encoded: BASE64.encode(email.as_bytes()),
            company: company.to_string(),
            expires_at,
        }
    }

    /// Decode the stored email; `None` when the stored value is not valid
    /// base64-wrapped UTF-8.
    pub fn email(&self) -> Option<String> {
        let bytes = BASE64.decode(&self.email_encoded).ok()?;
        String::from_utf8(bytes).ok()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

pub struct StateStore {
    conn: Connection,
}

impl StateStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Open (and migrate) the state database at `path`, creating parent
    /// directories as needed.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                let _ = std::fs::create_dir_all(parent);
            }
        }
        Ok(Self::new(crate::schema::open_and_migrate(path)?))
    }

    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM client_state WHERE key = ?1",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO client_state (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            (key, value, Utc::now().to_rfc3339()),
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM client_state WHERE key = ?1", [key])?;
        Ok(())
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.get_raw(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(key, error = %err, "discarding state row that fails schema validation");
                self.remove(key)?;
                Ok(None)
            }
        }
    }

    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|err| StoreError::JsonEncode {
            message: err.to_string(),
        })?;
        self.set_raw(key, &raw)
    }

    pub fn token(&self) -> Result<Option<String>, StoreError> {
        self.get_raw(KEY_TOKEN)
    }

    pub fn set_token(&self, token: &str) -> Result<(), StoreError> {
        self.set_raw(KEY_TOKEN, token)
    }

    pub fn session(&self) -> Result<Option<SessionState>, StoreError> {
        self.get_json(KEY_SESSION)
    }

    pub fn set_session(&self, session: &SessionState) -> Result<(), StoreError> {
        self.set_json(KEY_SESSION, session)
    }

    /// The storage half of the global 401 policy: drop the token and the
    /// session in one go. Navigation context keys survive a re-login.
    pub fn clear_session(&self) -> Result<(), StoreError> {
        self.remove(KEY_TOKEN)?;
        self.remove(KEY_SESSION)
    }

    pub fn selected_program(&self) -> Result<Option<SelectedProgram>, StoreError> {
        self.get_json(KEY_SELECTED_PROGRAM)
    }

    pub fn set_selected_program(&self, program: &SelectedProgram) -> Result<(), StoreError> {
        self.set_json(KEY_SELECTED_PROGRAM, program)
    }

    pub fn selected_evaluation(&self) -> Result<Option<SelectedEvaluation>, StoreError> {
        self.get_json(KEY_SELECTED_EVALUATION)
    }

    pub fn set_selected_evaluation(
        &self,
        evaluation: &SelectedEvaluation,
    ) -> Result<(), StoreError> {
        self.set_json(KEY_SELECTED_EVALUATION, evaluation)
    }

    pub fn clear_selected_evaluation(&self) -> Result<(), StoreError> {
        self.remove(KEY_SELECTED_EVALUATION)
    }

    /// Unexpired remember-me record, if any. Expired records are deleted on
    /// read rather than returned.
    pub fn remember_me(&self) -> Result<Option<RememberMe>, StoreError> {
        let Some(record) = self.get_json::<RememberMe>(KEY_REMEMBER_ME)? else {
            return Ok(None);
        };
        if record.is_expired(Utc::now()) {
            self.remove(KEY_REMEMBER_ME)?;
            return Ok(None);
        }
        Ok(Some(record))
    }

    pub fn set_remember_me(&self, record: &RememberMe) -> Result<(), StoreError> {
        self.set_json(KEY_REMEMBER_ME, record)
    }

    pub fn clear_remember_me(&self) -> Result<(), StoreError> {
        self.remove(KEY_REMEMBER_ME)
    }
}
