//! Lambda CLI commands.

use clap::{Parser, Subcommand};
use serde_json::Value;

use super::parse_json;

/// Lambda commands.
#[derive(Debug, Parser)]
pub struct LambdaCommand {
    #[command(subcommand)]
    pub action: LambdaAction,
}

/// Available Lambda actions.
#[derive(Debug, Subcommand)]
pub enum LambdaAction {
    /// Invoke a function.
    Invoke {
        /// Function name or ARN.
        function: String,
        /// JSON payload.
        #[arg(long, value_parser = parse_json)]
        params: Option<Value>,
        /// Custom client context as JSON.
        #[arg(long, value_parser = parse_json)]
        custom: Option<Value>,
        /// Environment client context as JSON.
        #[arg(long, value_parser = parse_json)]
        env: Option<Value>,
        /// Queue the event and return immediately.
        #[arg(long = "async")]
        asynchronous: bool,
    },
}
