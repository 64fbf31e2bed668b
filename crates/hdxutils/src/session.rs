//! AWS SDK configuration shared by every manager.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use tokio::sync::OnceCell;

/// Region used when `AWS_REGION` is unset.
pub const DEFAULT_REGION: &str = "us-east-1";

/// AWS client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsConfig {
    /// Custom endpoint URL (for local emulators).
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            endpoint_url: std::env::var("AWS_ENDPOINT_URL").ok(),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string()),
        }
    }
}

impl AwsConfig {
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local endpoint ({})", url),
            None => format!("AWS (region: {})", self.region),
        }
    }
}

/// Loads an SDK configuration using the default credential chain.
pub async fn load_sdk_config(config: &AwsConfig) -> SdkConfig {
    tracing::info!(target = %config.target_display(), "Loading AWS configuration");

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    loader.load().await
}

static SHARED: OnceCell<SdkConfig> = OnceCell::const_new();

/// Returns the process-wide SDK configuration, loading it from the
/// environment on first use. Concurrent first callers wait on one load.
pub async fn shared_sdk_config() -> &'static SdkConfig {
    SHARED
        .get_or_init(|| async { load_sdk_config(&AwsConfig::default()).await })
        .await
}
