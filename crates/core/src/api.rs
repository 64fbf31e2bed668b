//! Credentials and endpoint layout for the internal HTTP API.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// API connection settings as stored in the secrets vault.
#[derive(Clone, Deserialize)]
pub struct ApiCredentials {
    #[serde(rename = "inoa_url")]
    pub base_url: String,
    #[serde(rename = "inoa_path_api")]
    pub api_path: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("base_url", &self.base_url)
            .field("api_path", &self.api_path)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl ApiCredentials {
    pub fn from_secret(secret: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(secret)
    }

    /// Base URL joined with the API path.
    pub fn api_root(&self) -> String {
        format!("{}{}", self.base_url, self.api_path)
    }
}

/// `{api_root}/{module}/{method}`
pub fn endpoint(api_root: &str, module: &str, method: &str) -> String {
    format!("{api_root}/{module}/{method}")
}
