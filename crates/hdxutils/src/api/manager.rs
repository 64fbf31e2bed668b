//! HTTP client for the internal API.

use hdxutils_core::api::{endpoint, ApiCredentials};
use serde_json::Value;

use super::error::{ApiError, Result};
use crate::secrets::SecretsManager;

/// Number of response characters included in logs.
const LOG_PREVIEW_CHARS: usize = 100;

/// Calls `{api_root}/{module}/{method}` with basic auth.
#[derive(Debug, Clone)]
pub struct ApiManager {
    client: reqwest::Client,
    credentials: ApiCredentials,
}

impl ApiManager {
    /// Create a client from explicit credentials.
    pub fn new(credentials: ApiCredentials) -> Self {
        tracing::info!(api_root = %credentials.api_root(), "Creating instance of ApiManager");
        Self {
            client: reqwest::Client::new(),
            credentials,
        }
    }

    /// Create a client whose URL and credentials are read from a secret.
    pub async fn from_secret(secrets: &SecretsManager, secret_name: &str) -> Result<Self> {
        let secret = secrets.get_secret(secret_name).await?;
        Ok(Self::new(ApiCredentials::from_secret(&secret)?))
    }

    /// Get the API root URL.
    pub fn api_root(&self) -> String {
        self.credentials.api_root()
    }

    /// Build the URL for a module method.
    pub fn url(&self, module: &str, method: &str) -> String {
        endpoint(&self.credentials.api_root(), module, method)
    }

    /// POST `params` as JSON and return the JSON response.
    pub async fn call(&self, module: &str, method: &str, params: &Value) -> Result<Value> {
        let url = self.url(module, method);
        tracing::info!(%url, "Sending request");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .json(params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::info!(status = status.as_u16(), "Response status code");
        tracing::debug!(preview = %preview(&body), "Response content (truncated)");

        if !status.is_success() {
            return Err(ApiError::ServerError {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn preview(body: &str) -> String {
    let mut preview: String = body.chars().take(LOG_PREVIEW_CHARS).collect();
    if body.chars().nth(LOG_PREVIEW_CHARS).is_some() {
        preview.push_str("...");
    }
    preview
}
