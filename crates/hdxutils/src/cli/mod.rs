//! CLI command definitions.

pub mod api;
pub mod datalake;
pub mod dynamo;
pub mod lambda;
pub mod s3;
pub mod secrets;

use clap::{Parser, Subcommand, ValueEnum};
use hdxutils_core::dynamodb::Record;
use serde_json::Value;

/// Command line access to the hdxutils managers.
#[derive(Debug, Parser)]
#[command(name = "hdx")]
#[command(version, about = "Command line access to the hdxutils managers", long_about = None)]
pub struct Cli {
    /// AWS region.
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    pub region: String,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Log level used when RUST_LOG is unset (NOTSET, DEBUG, INFO, WARNING, ERROR, CRITICAL
    /// or any tracing filter directive).
    #[arg(long, env = "HDX_LOG_LEVEL", default_value = "WARNING")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// DynamoDB items and the attribute-value codec.
    Dynamo(dynamo::DynamoCommand),
    /// S3 objects.
    S3(s3::S3Command),
    /// Secrets Manager secrets.
    Secrets(secrets::SecretsCommand),
    /// Lambda invocations.
    Lambda(lambda::LambdaCommand),
    /// Athena SQL queries.
    Query(datalake::QueryCommand),
    /// Internal HTTP API calls.
    Api(api::ApiCommand),
}

/// Parse a JSON argument.
pub fn parse_json(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {e}"))
}

/// Parse a JSON object argument into a record.
pub fn parse_record(raw: &str) -> Result<Record, String> {
    match parse_json(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(format!("expected a JSON object, got {other}")),
    }
}

/// Translate Python-style level names into tracing filter directives.
/// Anything else is passed through unchanged.
pub fn log_filter(level: &str) -> String {
    match level.to_ascii_uppercase().as_str() {
        "NOTSET" => "trace".to_string(),
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => level.to_string(),
    }
}
