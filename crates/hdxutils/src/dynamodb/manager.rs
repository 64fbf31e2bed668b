//! DynamoDB manager implementation.

use aws_config::SdkConfig;
use aws_sdk_dynamodb::operation::query::builders::QueryFluentBuilder;
use aws_sdk_dynamodb::operation::scan::builders::ScanFluentBuilder;
use aws_sdk_dynamodb::Client;
use hdxutils_core::dynamodb::Record;
use serde::Serialize;

use super::conversions::{item_to_record, items_to_records, record_to_item, SdkItem};
use super::error::{
    map_delete_item_error, map_execute_statement_error, map_get_item_error, map_put_item_error,
    map_query_error, map_scan_error, Result,
};
use crate::session;

/// Decoded items plus their count.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Items {
    pub items: Vec<Record>,
    pub count: usize,
}

impl Items {
    fn from_records(items: Vec<Record>) -> Self {
        let count = items.len();
        Self { items, count }
    }
}

/// DynamoDB access over plain records.
#[derive(Debug, Clone)]
pub struct DynamoDbManager {
    client: Client,
}

impl DynamoDbManager {
    /// Creates a manager around an existing client.
    pub fn new(client: Client) -> Self {
        tracing::info!("Creating instance of DynamoDbManager");
        Self { client }
    }

    /// Creates a manager from an SDK configuration.
    pub fn from_conf(config: &SdkConfig) -> Self {
        Self::new(Client::new(config))
    }

    /// Creates a manager from the shared, lazily loaded SDK configuration.
    pub async fn from_env() -> Self {
        Self::from_conf(session::shared_sdk_config().await)
    }

    /// Runs a PartiQL statement and returns at most `limit` items.
    ///
    /// Result pages are followed until the limit is reached or the
    /// statement is exhausted.
    pub async fn pql_query(&self, statement: &str, limit: usize) -> Result<Items> {
        tracing::debug!(statement, limit, "Executing PartiQL statement");

        let mut raw: Vec<SdkItem> = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = self
                .client
                .execute_statement()
                .statement(statement)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| map_execute_statement_error(e, statement))?;

            raw.extend(output.items().iter().cloned());
            next_token = output.next_token().map(str::to_string);

            if raw.len() >= limit || next_token.is_none() {
                break;
            }
        }

        raw.truncate(limit);
        Ok(Items::from_records(items_to_records(&raw)?))
    }

    /// Queries a table. `configure` sets the key condition, index and any
    /// other request parameters.
    pub async fn query<F>(&self, table: &str, configure: F) -> Result<Items>
    where
        F: FnOnce(QueryFluentBuilder) -> QueryFluentBuilder,
    {
        tracing::debug!(table, "Querying table");

        let output = configure(self.client.query().table_name(table))
            .send()
            .await
            .map_err(|e| map_query_error(e, table))?;

        Ok(Items::from_records(items_to_records(output.items())?))
    }

    /// Scans a table. When the response carries no items (for example with
    /// `Select::Count`), the service-reported count is returned instead.
    pub async fn scan<F>(&self, table: &str, configure: F) -> Result<Items>
    where
        F: FnOnce(ScanFluentBuilder) -> ScanFluentBuilder,
    {
        tracing::debug!(table, "Scanning table");

        let output = configure(self.client.scan().table_name(table))
            .send()
            .await
            .map_err(|e| map_scan_error(e, table))?;

        match output.items {
            Some(items) => Ok(Items::from_records(items_to_records(&items)?)),
            None => Ok(Items {
                items: Vec::new(),
                count: usize::try_from(output.count).unwrap_or_default(),
            }),
        }
    }

    /// Gets a single item by its key fields. Returns `None` when absent.
    pub async fn get_item(&self, table: &str, keys: &Record) -> Result<Option<Record>> {
        tracing::debug!(table, "Getting item");

        let output = self
            .client
            .get_item()
            .table_name(table)
            .set_key(Some(record_to_item(keys)?))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, table))?;

        match output.item {
            Some(item) => Ok(Some(item_to_record(&item)?)),
            None => Ok(None),
        }
    }

    /// Writes an item, replacing any item with the same key.
    pub async fn put_item(&self, table: &str, item: &Record) -> Result<()> {
        tracing::debug!(table, "Putting item");

        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(record_to_item(item)?))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, table))?;

        Ok(())
    }

    /// Deletes an item by its key fields.
    pub async fn delete_item(&self, table: &str, keys: &Record) -> Result<()> {
        tracing::debug!(table, "Deleting item");

        self.client
            .delete_item()
            .table_name(table)
            .set_key(Some(record_to_item(keys)?))
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, table))?;

        Ok(())
    }
}
