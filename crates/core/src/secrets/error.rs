use thiserror::Error;

/// Errors that can occur while reading a secret payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SecretError {
    #[error("Secret has neither a string nor a binary payload")]
    EmptyPayload,
    #[error("Secret is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("Secret binary is not valid base64: {0}")]
    InvalidBase64(String),
    #[error("Secret is missing field: {0}")]
    MissingField(&'static str),
}

/// Result type for secret parsing.
pub type Result<T> = std::result::Result<T, SecretError>;
