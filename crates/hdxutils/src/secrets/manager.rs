//! Secrets manager implementation.

use std::sync::Arc;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_secretsmanager::config::Region;
use aws_sdk_secretsmanager::Client;
use hdxutils_core::secrets::{cache_key, parse_secret, SecretError, SecretPayload};
use serde_json::Value;

use super::cache::SecretCache;
use super::error::{map_get_secret_value_error, Result};
use crate::config::Config;
use crate::session;

/// Where raw secret payloads come from.
#[async_trait]
pub trait SecretSource: Send + Sync {
    /// Fetches the current payload of a secret by name.
    async fn fetch(&self, name: &str) -> Result<SecretPayload>;
}

/// `SecretSource` backed by AWS Secrets Manager.
#[derive(Debug, Clone)]
pub struct AwsSecretSource {
    client: Client,
}

impl AwsSecretSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SecretSource for AwsSecretSource {
    async fn fetch(&self, name: &str) -> Result<SecretPayload> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(name)
            .send()
            .await
            .map_err(|e| map_get_secret_value_error(e, name))?;

        match (output.secret_string, output.secret_binary) {
            (Some(text), _) => Ok(SecretPayload::Text(text)),
            (None, Some(blob)) => Ok(SecretPayload::Binary(blob.into_inner())),
            (None, None) => Err(SecretError::EmptyPayload.into()),
        }
    }
}

/// JSON secrets by name, optionally cached.
#[derive(Clone)]
pub struct SecretsManager {
    source: Arc<dyn SecretSource>,
    region: String,
    cache: Option<SecretCache>,
}

impl SecretsManager {
    /// Creates an uncached manager over any secret source.
    pub fn new(source: impl SecretSource + 'static, region: impl Into<String>) -> Self {
        let region = region.into();
        tracing::info!(%region, "Creating instance of SecretsManager");
        Self {
            source: Arc::new(source),
            region,
            cache: None,
        }
    }

    /// Caches parsed secrets in `cache`. Clones of the cache may be shared
    /// between managers.
    pub fn with_cache(mut self, cache: SecretCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Creates a manager for `region` from an SDK configuration.
    pub fn from_conf(config: &SdkConfig, region: impl Into<String>) -> Self {
        let region = region.into();
        let client_config = aws_sdk_secretsmanager::config::Builder::from(config)
            .region(Region::new(region.clone()))
            .build();
        Self::new(
            AwsSecretSource::new(Client::from_conf(client_config)),
            region,
        )
    }

    /// Creates a cached manager from the shared SDK configuration and the
    /// application configuration.
    pub async fn from_env(config: &Config) -> Self {
        Self::from_conf(session::shared_sdk_config().await, config.region.clone()).with_cache(
            SecretCache::new(config.secrets_cache_max_entries, config.secrets_cache_ttl()),
        )
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Gets a secret and parses it as JSON.
    pub async fn get_secret(&self, name: &str) -> Result<Value> {
        tracing::info!(name, region = %self.region, "Getting secret");

        let key = cache_key(&self.region, name);

        if let Some(cache) = &self.cache {
            if let Some(secret) = cache.get(&key).await {
                tracing::debug!(name, "Secret served from cache");
                return Ok(secret);
            }
        }

        let payload = self.source.fetch(name).await?;
        let secret = parse_secret(&payload)?;

        if let Some(cache) = &self.cache {
            cache.insert(&key, secret.clone()).await;
        }

        Ok(secret)
    }
}
