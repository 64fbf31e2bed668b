//! Datalake (Athena) connection settings.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors in datalake connection settings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DatalakeConfigError {
    #[error("s3_dir has received an invalid s3 path: {0}")]
    InvalidStagingDir(String),
}

/// Query results are staged under an `s3://` location.
pub fn validate_staging_dir(dir: &str) -> Result<(), DatalakeConfigError> {
    if dir.contains("s3://") {
        Ok(())
    } else {
        Err(DatalakeConfigError::InvalidStagingDir(dir.to_string()))
    }
}

/// Access keys stored in the secrets vault under `key` and `secret`.
#[derive(Clone, Deserialize)]
pub struct DatalakeCredentials {
    #[serde(rename = "key")]
    pub access_key_id: String,
    #[serde(rename = "secret")]
    pub secret_access_key: String,
}

impl fmt::Debug for DatalakeCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatalakeCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

impl DatalakeCredentials {
    pub fn from_secret(secret: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(secret)
    }
}
