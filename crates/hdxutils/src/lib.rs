//! AWS adapters over the hdxutils codecs, plus the `hdx` command line.

pub mod api;
pub mod cli;
pub mod config;
pub mod datalake;
pub mod dynamodb;
pub mod lambda;
pub mod output;
pub mod s3;
pub mod secrets;
pub mod session;

pub use config::Config;
