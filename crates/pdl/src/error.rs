use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {message}")]
    Config { message: String },
    #[error(transparent)]
    Api(#[from] pdl_api::ApiError),
    #[error(transparent)]
    Store(#[from] pdl_store::StoreError),
    #[error(transparent)]
    Report(#[from] pdl_report::ReportError),
    /// Cached navigation context is missing; the message points at the
    /// listing command to rebuild it.
    #[error("{message}")]
    MissingContext { message: String },
    #[error("{message}")]
    NotFound { message: String },
}
