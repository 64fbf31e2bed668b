use thiserror::Error;

/// Errors that can occur while decoding attribute values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Unrecognized attribute tag: {0}")]
    UnknownTag(String),
    #[error("Malformed attribute envelope: {0}")]
    MalformedEnvelope(String),
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, DecodeError>;
