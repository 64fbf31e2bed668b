//! S3 error mapping.

use std::fmt::Debug;

use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::operation::get_object::GetObjectError;
use hdxutils_core::excel::ExcelError;
use hdxutils_core::frame::FrameError;
use thiserror::Error;

/// Errors that can occur during S3 operations.
#[derive(Debug, Error)]
pub enum S3Error {
    #[error("Object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },
    #[error("{operation} failed: {message}")]
    Service {
        operation: &'static str,
        message: String,
    },
    #[error("Failed to read object body: {0}")]
    Body(String),
    #[error("Failed to presign request: {0}")]
    Presign(String),
    #[error("Failed to read local file: {0}")]
    LocalFile(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error(transparent)]
    Excel(#[from] ExcelError),
}

/// Result type for S3 operations.
pub type Result<T> = std::result::Result<T, S3Error>;

/// Map any S3 SDK error to a service error for `operation`.
pub fn map_sdk_error<E, R>(err: SdkError<E, R>, operation: &'static str) -> S3Error
where
    E: std::error::Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    S3Error::Service {
        operation,
        message: DisplayErrorContext(&err).to_string(),
    }
}

/// Map a GetObject SDK error, reporting missing keys as `NotFound`.
pub fn map_get_object_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetObjectError, R>,
    bucket: &str,
    key: &str,
) -> S3Error {
    match err.as_service_error() {
        Some(GetObjectError::NoSuchKey(_)) => S3Error::NotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        },
        _ => map_sdk_error(err, "GetObject"),
    }
}
