//! Lambda error mapping.

use std::fmt::Debug;

use aws_sdk_lambda::error::SdkError;
use aws_sdk_lambda::operation::invoke::InvokeError;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while invoking a function.
#[derive(Debug, Error)]
pub enum LambdaError {
    #[error("Function not found: {0}")]
    FunctionNotFound(String),
    #[error("Function is throttled, please retry")]
    Throttled,
    #[error("Invoke failed: {0}")]
    Service(String),
    #[error("Function {function} raised {kind}: {payload}")]
    FunctionError {
        function: String,
        kind: String,
        payload: Value,
    },
    #[error("Invalid payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Result type for Lambda operations.
pub type Result<T> = std::result::Result<T, LambdaError>;

/// Map an Invoke SDK error to LambdaError.
pub fn map_invoke_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<InvokeError, R>,
    function: &str,
) -> LambdaError {
    match err.into_service_error() {
        InvokeError::ResourceNotFoundException(_) => {
            LambdaError::FunctionNotFound(function.to_string())
        }
        InvokeError::TooManyRequestsException(_) => LambdaError::Throttled,
        err => LambdaError::Service(format!("{err:?}")),
    }
}
