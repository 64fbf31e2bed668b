//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `DynamoDbError`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::execute_statement::ExecuteStatementError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use hdxutils_core::dynamodb::DecodeError;
use thiserror::Error;

/// Errors that can occur during DynamoDB operations.
#[derive(Debug, Error)]
pub enum DynamoDbError {
    #[error("Table not found: {0}")]
    TableNotFound(String),
    #[error("{0}, please retry")]
    Throttled(&'static str),
    #[error("{operation} failed: {message}")]
    Service {
        operation: &'static str,
        message: String,
    },
    #[error("Item conversion failed: {0}")]
    Codec(#[from] DecodeError),
}

/// Result type for DynamoDB operations.
pub type Result<T> = std::result::Result<T, DynamoDbError>;

fn service(operation: &'static str, err: impl Debug) -> DynamoDbError {
    DynamoDbError::Service {
        operation,
        message: format!("{err:?}"),
    }
}

/// Map a GetItem SDK error to DynamoDbError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
    table: &str,
) -> DynamoDbError {
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => DynamoDbError::TableNotFound(table.to_string()),
        GetItemError::ProvisionedThroughputExceededException(_) => {
            DynamoDbError::Throttled("Throughput exceeded")
        }
        GetItemError::RequestLimitExceeded(_) => DynamoDbError::Throttled("Request limit exceeded"),
        err => service("GetItem", err),
    }
}

/// Map a PutItem SDK error to DynamoDbError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    table: &str,
) -> DynamoDbError {
    match err.into_service_error() {
        PutItemError::ResourceNotFoundException(_) => DynamoDbError::TableNotFound(table.to_string()),
        PutItemError::ProvisionedThroughputExceededException(_) => {
            DynamoDbError::Throttled("Throughput exceeded")
        }
        PutItemError::RequestLimitExceeded(_) => DynamoDbError::Throttled("Request limit exceeded"),
        PutItemError::TransactionConflictException(_) => {
            DynamoDbError::Throttled("Transaction conflict")
        }
        err => service("PutItem", err),
    }
}

/// Map a DeleteItem SDK error to DynamoDbError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
    table: &str,
) -> DynamoDbError {
    match err.into_service_error() {
        DeleteItemError::ResourceNotFoundException(_) => {
            DynamoDbError::TableNotFound(table.to_string())
        }
        DeleteItemError::ProvisionedThroughputExceededException(_) => {
            DynamoDbError::Throttled("Throughput exceeded")
        }
        DeleteItemError::RequestLimitExceeded(_) => {
            DynamoDbError::Throttled("Request limit exceeded")
        }
        DeleteItemError::TransactionConflictException(_) => {
            DynamoDbError::Throttled("Transaction conflict")
        }
        err => service("DeleteItem", err),
    }
}

/// Map a Query SDK error to DynamoDbError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
    table: &str,
) -> DynamoDbError {
    match err.into_service_error() {
        QueryError::ResourceNotFoundException(_) => DynamoDbError::TableNotFound(table.to_string()),
        QueryError::ProvisionedThroughputExceededException(_) => {
            DynamoDbError::Throttled("Throughput exceeded")
        }
        QueryError::RequestLimitExceeded(_) => DynamoDbError::Throttled("Request limit exceeded"),
        err => service("Query", err),
    }
}

/// Map a Scan SDK error to DynamoDbError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
    table: &str,
) -> DynamoDbError {
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => DynamoDbError::TableNotFound(table.to_string()),
        ScanError::ProvisionedThroughputExceededException(_) => {
            DynamoDbError::Throttled("Throughput exceeded")
        }
        err => service("Scan", err),
    }
}

/// Map an ExecuteStatement SDK error to DynamoDbError.
///
/// PartiQL statements name their table inline, so a missing table is
/// reported against the statement text.
pub fn map_execute_statement_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ExecuteStatementError, R>,
    statement: &str,
) -> DynamoDbError {
    match err.into_service_error() {
        ExecuteStatementError::ResourceNotFoundException(_) => {
            DynamoDbError::TableNotFound(statement.to_string())
        }
        ExecuteStatementError::ProvisionedThroughputExceededException(_) => {
            DynamoDbError::Throttled("Throughput exceeded")
        }
        err => service("ExecuteStatement", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_not_found_display() {
        let error = DynamoDbError::TableNotFound("prices".to_string());
        assert_eq!(error.to_string(), "Table not found: prices");
    }

    #[test]
    fn test_throttled_display() {
        let error = DynamoDbError::Throttled("Throughput exceeded");
        assert_eq!(error.to_string(), "Throughput exceeded, please retry");
    }

    #[test]
    fn test_service_display() {
        let error = DynamoDbError::Service {
            operation: "Scan",
            message: "boom".to_string(),
        };
        assert_eq!(error.to_string(), "Scan failed: boom");
    }

    #[test]
    fn test_codec_error_converts() {
        let error: DynamoDbError = DecodeError::UnknownTag("ZZ".to_string()).into();
        assert_eq!(
            error.to_string(),
            "Item conversion failed: Unrecognized attribute tag: ZZ"
        );
    }
}
