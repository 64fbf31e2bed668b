//! Secrets Manager access with an explicit cache.

mod cache;
mod error;
mod manager;

pub use cache::SecretCache;
pub use error::{Result, SecretsError};
pub use manager::{AwsSecretSource, SecretSource, SecretsManager};
