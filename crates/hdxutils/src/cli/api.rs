//! Internal API CLI commands.

use clap::{Parser, Subcommand};
use serde_json::Value;

use super::parse_json;

/// Internal API commands.
#[derive(Debug, Parser)]
pub struct ApiCommand {
    #[command(subcommand)]
    pub action: ApiAction,
}

/// Available API actions.
#[derive(Debug, Subcommand)]
pub enum ApiAction {
    /// Call a module method.
    Call {
        /// Module name.
        module: String,
        /// Method name.
        method: String,
        /// Request parameters as JSON.
        #[arg(long, value_parser = parse_json, default_value = "{}")]
        params: Value,
        /// Secret holding the API URL and credentials.
        #[arg(long, env = "HDX_API_SECRET")]
        secret: String,
    },
}
