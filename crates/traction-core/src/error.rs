use thiserror::Error;

/// Top-level error type for the Traction system.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define their
/// own error types and implement `From<SubsystemError> for TractionError` so
/// that the `?` operator works seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TractionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Submission error: {0}")]
    Submission(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for TractionError {
    fn from(err: toml::de::Error) -> Self {
        TractionError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for TractionError {
    fn from(err: toml::ser::Error) -> Self {
        TractionError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for TractionError {
    fn from(err: serde_json::Error) -> Self {
        TractionError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Traction operations.
pub type Result<T> = std::result::Result<T, TractionError>;
