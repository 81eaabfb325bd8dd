//! Error types for the circulation admin

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Save failed: {0}")]
    SaveFailure(String),

    #[error("Delete failed: {0}")]
    DeleteFailure(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AdminError {
    /// Message shown inline next to the control that failed
    pub fn user_message(&self) -> String {
        match self {
            AdminError::Http(e) => {
                tracing::error!("HTTP error: {:?}", e);
                "Could not reach the server".to_string()
            }
            AdminError::Json(e) => {
                tracing::error!("Unexpected response: {:?}", e);
                "Unexpected response from the server".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Result type alias for admin operations
pub type AdminResult<T> = Result<T, AdminError>;

/// Outcome of an operation guarded by a blocking confirmation prompt.
///
/// A declined prompt is not an error: the operation aborts without any
/// state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}
