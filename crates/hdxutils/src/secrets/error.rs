//! Secrets Manager error mapping.

use std::fmt::Debug;

use aws_sdk_secretsmanager::error::SdkError;
use aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueError;
use hdxutils_core::secrets::SecretError;
use thiserror::Error;

/// Errors that can occur while fetching secrets.
#[derive(Debug, Error)]
pub enum SecretsError {
    #[error("Secret not found: {0}")]
    NotFound(String),
    #[error("Secret {name} could not be decrypted")]
    Decryption { name: String },
    #[error("GetSecretValue failed: {0}")]
    Service(String),
    #[error(transparent)]
    Payload(#[from] SecretError),
}

/// Result type for secret operations.
pub type Result<T> = std::result::Result<T, SecretsError>;

/// Map a GetSecretValue SDK error to SecretsError.
pub fn map_get_secret_value_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetSecretValueError, R>,
    name: &str,
) -> SecretsError {
    match err.into_service_error() {
        GetSecretValueError::ResourceNotFoundException(_) => {
            SecretsError::NotFound(name.to_string())
        }
        GetSecretValueError::DecryptionFailure(_) => SecretsError::Decryption {
            name: name.to_string(),
        },
        err => SecretsError::Service(format!("{err:?}")),
    }
}
