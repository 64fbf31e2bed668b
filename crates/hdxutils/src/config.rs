use std::{env, time::Duration};

use crate::session::{AwsConfig, DEFAULT_REGION};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// AWS region (default: "us-east-1")
    pub region: String,
    /// Custom AWS endpoint, e.g. a local emulator (default: unset)
    pub endpoint_url: Option<String>,
    /// Maximum number of cached secrets (default: 1,000)
    pub secrets_cache_max_entries: usize,
    /// Secret cache TTL in seconds (default: unset, entries never expire)
    pub secrets_cache_ttl_seconds: Option<u64>,
    /// Maximum items returned by a PartiQL query (default: 3,000)
    pub pql_limit: usize,
    /// Presigned URL lifetime in seconds (default: 360)
    pub presign_expires_seconds: u64,
    /// Delay between Athena status polls in milliseconds (default: 500)
    pub athena_poll_millis: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    /// - `AWS_ENDPOINT_URL` - Custom endpoint URL (default: unset)
    /// - `HDX_SECRETS_CACHE_MAX_ENTRIES` - Maximum cached secrets (default: 1,000)
    /// - `HDX_SECRETS_CACHE_TTL_SECONDS` - Secret cache TTL (default: unset)
    /// - `HDX_PQL_LIMIT` - PartiQL item limit (default: 3,000)
    /// - `HDX_PRESIGN_EXPIRES_SECONDS` - Presigned URL lifetime (default: 360)
    /// - `HDX_ATHENA_POLL_MILLIS` - Athena poll interval (default: 500)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str| lookup(key).and_then(|v| v.parse().ok());

        Self {
            region: lookup("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            endpoint_url: lookup("AWS_ENDPOINT_URL"),
            secrets_cache_max_entries: parsed("HDX_SECRETS_CACHE_MAX_ENTRIES")
                .map(|v: u64| v as usize)
                .filter(|v| *v > 0)
                .unwrap_or(1_000),
            secrets_cache_ttl_seconds: parsed("HDX_SECRETS_CACHE_TTL_SECONDS"),
            pql_limit: parsed("HDX_PQL_LIMIT")
                .map(|v: u64| v as usize)
                .unwrap_or(3_000),
            presign_expires_seconds: parsed("HDX_PRESIGN_EXPIRES_SECONDS").unwrap_or(360),
            athena_poll_millis: parsed("HDX_ATHENA_POLL_MILLIS").unwrap_or(500),
        }
    }

    /// AWS client configuration for this application configuration.
    pub fn aws(&self) -> AwsConfig {
        AwsConfig {
            endpoint_url: self.endpoint_url.clone(),
            region: self.region.clone(),
        }
    }

    /// Get secret cache TTL as a Duration.
    pub fn secrets_cache_ttl(&self) -> Option<Duration> {
        self.secrets_cache_ttl_seconds.map(Duration::from_secs)
    }

    /// Get presigned URL lifetime as a Duration.
    pub fn presign_expires(&self) -> Duration {
        Duration::from_secs(self.presign_expires_seconds)
    }

    /// Get Athena poll interval as a Duration.
    pub fn athena_poll_interval(&self) -> Duration {
        Duration::from_millis(self.athena_poll_millis)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
