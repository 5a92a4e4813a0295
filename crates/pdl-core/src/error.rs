use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required field missing: {field}")]
    MissingField { field: &'static str },
    #[error("recommendation score out of range: {value} (expected 0-10)")]
    ScoreOutOfRange { value: u8 },
}
