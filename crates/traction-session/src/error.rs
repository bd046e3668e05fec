//! Session-level error types.

use thiserror::Error;

use crate::state::SessionState;
use traction_core::TractionError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Invalid state transition: {0} -> {1}")]
    InvalidTransition(SessionState, SessionState),

    #[error("Session is not streaming")]
    NotStreaming,
}

impl From<SessionError> for TractionError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Stream(msg) => TractionError::Stream(msg),
            other => TractionError::Session(other.to_string()),
        }
    }
}
