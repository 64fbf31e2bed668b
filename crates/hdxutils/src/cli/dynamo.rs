//! DynamoDB CLI commands.

use clap::{Parser, Subcommand};
use hdxutils_core::dynamodb::Record;
use serde_json::Value;

use super::{parse_json, parse_record};

/// DynamoDB commands.
#[derive(Debug, Parser)]
pub struct DynamoCommand {
    #[command(subcommand)]
    pub action: DynamoAction,
}

/// Available DynamoDB actions.
#[derive(Debug, Subcommand)]
pub enum DynamoAction {
    /// Get an item by key.
    Get {
        /// Table name.
        table: String,
        /// Key fields as a JSON object.
        #[arg(long, value_parser = parse_record)]
        key: Record,
    },
    /// Put an item.
    Put {
        /// Table name.
        table: String,
        /// Item as a JSON object.
        #[arg(long, value_parser = parse_record)]
        item: Record,
    },
    /// Delete an item by key.
    Delete {
        /// Table name.
        table: String,
        /// Key fields as a JSON object.
        #[arg(long, value_parser = parse_record)]
        key: Record,
    },
    /// Scan a table.
    Scan {
        /// Table name.
        table: String,
        /// Maximum number of items to evaluate.
        #[arg(long)]
        limit: Option<i32>,
    },
    /// Run a PartiQL statement.
    Pql {
        /// PartiQL statement.
        statement: String,
        /// Maximum number of items to return (default: HDX_PQL_LIMIT).
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Encode a JSON object into attribute-value form (offline).
    Encode {
        /// Item as a JSON object.
        #[arg(value_parser = parse_record)]
        item: Record,
    },
    /// Decode an attribute-value item into plain JSON (offline).
    Decode {
        /// Item in attribute-value form.
        #[arg(value_parser = parse_json)]
        item: Value,
    },
}
