//! API client error types.

use thiserror::Error;

use crate::secrets::SecretsError;

/// Errors that can occur while calling the API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Failed to read API credentials: {0}")]
    Secrets(#[from] SecretsError),

    #[error("Invalid API credentials: {0}")]
    Credentials(#[from] serde_json::Error),
}

/// Result type alias for the API client.
pub type Result<T> = std::result::Result<T, ApiError>;
