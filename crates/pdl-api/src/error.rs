use pdl_core::ValidationError;
use thiserror::Error;

/// Client-side error taxonomy. No variant is retried anywhere: every
/// failure is terminal for that user action until manually retried.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected locally, never sent over the wire.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Missing or expired token. The registered session-expired hook has
    /// already fired and the client token is cleared.
    #[error("authentication required")]
    Unauthorized,
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("network error: {message}")]
    Network { message: String },
    #[error("response decode failed: {message}")]
    Decode { message: String },
    #[error("invalid url: {message}")]
    Url { message: String },
}
