//! Secrets CLI commands.

use clap::{Parser, Subcommand};

/// Secrets commands.
#[derive(Debug, Parser)]
pub struct SecretsCommand {
    #[command(subcommand)]
    pub action: SecretsAction,
}

/// Available secrets actions.
#[derive(Debug, Subcommand)]
pub enum SecretsAction {
    /// Get a secret as JSON.
    Get {
        /// Secret name.
        name: String,
    },
}
