//! DynamoDB manager.
//!
//! Reads and writes dynamically-typed records through `aws-sdk-dynamodb`,
//! using the attribute-value codec from `hdxutils_core`.

mod conversions;
mod error;
mod manager;

pub use conversions::{item_to_record, items_to_records, record_to_item, SdkItem};
pub use error::{DynamoDbError, Result};
pub use manager::{DynamoDbManager, Items};
