//! Error taxonomy for the intake core.
//!
//! Every variant is recoverable at the UI boundary; none of them leave a
//! partially written record behind.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    /// A required form field was missing, blank, or not a known value.
    #[error("Validation error: {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("No data to export")]
    EmptyHistory,

    /// Persisted history could not be parsed (strict load policy only).
    #[error("Malformed durable state under key '{key}': {message}")]
    MalformedDurableState { key: String, message: String },

    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl IntakeError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        IntakeError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            IntakeError::Validation { .. } | IntakeError::EmptyHistory
        )
    }
}

impl From<serde_json::Error> for IntakeError {
    fn from(err: serde_json::Error) -> Self {
        IntakeError::Storage(anyhow::Error::new(err).context("failed to serialize feedback data"))
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;
