pub mod auth;
pub mod client;
pub mod companies;
pub mod envelope;
pub mod error;
pub mod evaluations;
pub mod latest;
pub mod programs;

pub use crate::client::ApiClient;
pub use crate::error::ApiError;
pub use crate::latest::LatestOnly;
