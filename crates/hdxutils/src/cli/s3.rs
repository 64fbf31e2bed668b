//! S3 CLI commands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hdxutils_core::excel::{ColumnSpan, ExcelError};

/// S3 commands.
#[derive(Debug, Parser)]
pub struct S3Command {
    #[command(subcommand)]
    pub action: S3Action,
}

/// Available S3 actions.
#[derive(Debug, Subcommand)]
pub enum S3Action {
    /// List objects in a bucket.
    Ls {
        /// Bucket name.
        bucket: String,
        /// Key prefix filter.
        #[arg(long, default_value = "")]
        prefix: String,
    },
    /// Check whether an object exists.
    Exists {
        /// Bucket name.
        bucket: String,
        /// Object key.
        key: String,
    },
    /// Print an object as JSON.
    Json {
        /// Bucket name.
        bucket: String,
        /// Object key.
        key: String,
    },
    /// Print an object as a CSV table.
    Csv {
        /// Bucket name.
        bucket: String,
        /// Object key.
        key: String,
        /// Field delimiter.
        #[arg(long, default_value_t = ',')]
        delimiter: char,
    },
    /// Print an Excel sheet as a table, or list the sheets when none is given.
    Excel {
        /// Bucket name.
        bucket: String,
        /// Object key.
        key: String,
        /// Sheet name.
        #[arg(long)]
        sheet: Option<String>,
        /// Rows to skip above the header row.
        #[arg(long, default_value_t = 0)]
        skip_header: u32,
        /// Column letters to read.
        #[arg(long, value_parser = parse_columns, default_value = "A:Z")]
        columns: ColumnSpan,
    },
    /// Generate a presigned download URL.
    Url {
        /// Bucket name.
        bucket: String,
        /// Object key.
        key: String,
        /// Lifetime in seconds (default: HDX_PRESIGN_EXPIRES_SECONDS).
        #[arg(long)]
        expires: Option<u64>,
    },
    /// Upload a local file.
    Upload {
        /// Bucket name.
        bucket: String,
        /// Local file path.
        path: PathBuf,
        /// Target object key.
        key: String,
    },
}

fn parse_columns(raw: &str) -> Result<ColumnSpan, String> {
    raw.parse().map_err(|e: ExcelError| e.to_string())
}
