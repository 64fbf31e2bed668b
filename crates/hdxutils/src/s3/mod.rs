//! S3 object storage manager.

mod error;
mod manager;

pub use error::{Result, S3Error};
pub use manager::{ObjectSummary, S3Manager};
