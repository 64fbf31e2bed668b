//! Datalake CLI command.

use clap::Parser;

/// Run an Athena SQL query.
#[derive(Debug, Parser)]
pub struct QueryCommand {
    /// SQL statement.
    pub sql: String,
    /// Secret holding the access keys.
    #[arg(long, env = "HDX_DATALAKE_SECRET")]
    pub secret: String,
    /// S3 staging directory for results.
    #[arg(long, env = "HDX_DATALAKE_STAGING_DIR")]
    pub staging_dir: String,
}
