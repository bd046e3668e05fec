//! Sink error types.

use thiserror::Error;

use traction_core::TractionError;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Sink credentials are not configured")]
    MissingCredentials,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Sink rejected the task (HTTP {status}): {detail}")]
    Rejected { status: u16, detail: String },
}

impl From<reqwest::Error> for SinkError {
    fn from(err: reqwest::Error) -> Self {
        SinkError::RequestFailed(err.to_string())
    }
}

impl From<SinkError> for TractionError {
    fn from(err: SinkError) -> Self {
        TractionError::Submission(err.to_string())
    }
}
