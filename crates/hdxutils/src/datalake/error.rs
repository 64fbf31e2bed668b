//! Datalake error types.

use std::fmt::Debug;

use aws_sdk_athena::error::{DisplayErrorContext, SdkError};
use hdxutils_core::datalake::DatalakeConfigError;
use hdxutils_core::frame::FrameError;
use thiserror::Error;

use crate::secrets::SecretsError;

/// Errors that can occur while running datalake queries.
#[derive(Debug, Error)]
pub enum DatalakeError {
    #[error(transparent)]
    Config(#[from] DatalakeConfigError),
    #[error("Failed to read datalake credentials: {0}")]
    Secrets(#[from] SecretsError),
    #[error("Invalid datalake credentials: {0}")]
    Credentials(#[from] serde_json::Error),
    #[error("{operation} failed: {message}")]
    Service {
        operation: &'static str,
        message: String,
    },
    #[error("Athena did not return a query execution id")]
    MissingExecutionId,
    #[error("Query {state}: {reason}")]
    QueryFailed { state: String, reason: String },
    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Result type for datalake operations.
pub type Result<T> = std::result::Result<T, DatalakeError>;

/// Map any Athena SDK error to a service error for `operation`.
pub fn map_sdk_error<E, R>(err: SdkError<E, R>, operation: &'static str) -> DatalakeError
where
    E: std::error::Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    DatalakeError::Service {
        operation,
        message: DisplayErrorContext(&err).to_string(),
    }
}
