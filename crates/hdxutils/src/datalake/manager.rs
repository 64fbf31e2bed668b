//! Datalake manager implementation.

use std::time::Duration;

use aws_config::SdkConfig;
use aws_sdk_athena::config::{Credentials, Region};
use aws_sdk_athena::types::{QueryExecutionState, ResultConfiguration, Row};
use aws_sdk_athena::Client;
use hdxutils_core::datalake::{validate_staging_dir, DatalakeCredentials};
use hdxutils_core::frame::Frame;

use super::error::{map_sdk_error, DatalakeError, Result};
use crate::secrets::SecretsManager;

const CREDENTIALS_PROVIDER: &str = "hdxutils-secret";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Runs SQL through Athena and returns tabular results.
#[derive(Debug, Clone)]
pub struct DatalakeManager {
    client: Client,
    staging_dir: String,
    poll_interval: Duration,
}

impl DatalakeManager {
    /// Creates a manager around an existing client. Query results are
    /// staged under `staging_dir`, which must be an `s3://` location.
    pub fn new(client: Client, staging_dir: impl Into<String>) -> Result<Self> {
        let staging_dir = staging_dir.into();
        validate_staging_dir(&staging_dir)?;

        tracing::info!(%staging_dir, "Creating instance of DatalakeManager");
        Ok(Self {
            client,
            staging_dir,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Creates a manager from an SDK configuration, with access keys read
    /// from `secret_name` (fields `key` and `secret`) in place of the
    /// configuration's own credentials.
    pub async fn from_secret(
        config: &SdkConfig,
        secrets: &SecretsManager,
        secret_name: &str,
        staging_dir: &str,
        region: &str,
    ) -> Result<Self> {
        validate_staging_dir(staging_dir)?;

        let secret = secrets.get_secret(secret_name).await?;
        let credentials = DatalakeCredentials::from_secret(&secret)?;

        let config = aws_sdk_athena::config::Builder::from(config)
            .region(Region::new(region.to_string()))
            .credentials_provider(Credentials::new(
                credentials.access_key_id,
                credentials.secret_access_key,
                None,
                None,
                CREDENTIALS_PROVIDER,
            ))
            .build();

        Self::new(Client::from_conf(config), staging_dir)
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Runs `sql` and returns every result row. The first result row is the
    /// header.
    pub async fn query(&self, sql: &str) -> Result<Frame> {
        tracing::info!(sql, "Sending query to Athena");

        let started = self
            .client
            .start_query_execution()
            .query_string(sql)
            .result_configuration(
                ResultConfiguration::builder()
                    .output_location(&self.staging_dir)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "StartQueryExecution"))?;

        let execution_id = started
            .query_execution_id()
            .ok_or(DatalakeError::MissingExecutionId)?;

        self.wait_for(execution_id).await?;

        let mut rows = Vec::new();
        let mut pages = self
            .client
            .get_query_results()
            .query_execution_id(execution_id)
            .into_paginator()
            .send();

        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| map_sdk_error(e, "GetQueryResults"))?;
            if let Some(result_set) = page.result_set() {
                rows.extend(result_set.rows().iter().map(row_cells));
            }
        }

        let frame = Frame::from_header_rows(rows)?;

        tracing::info!(size = frame.size(), "Dataframe size");
        tracing::info!(head = ?frame.head(2), "Dataframe head");

        Ok(frame)
    }

    async fn wait_for(&self, execution_id: &str) -> Result<()> {
        loop {
            let output = self
                .client
                .get_query_execution()
                .query_execution_id(execution_id)
                .send()
                .await
                .map_err(|e| map_sdk_error(e, "GetQueryExecution"))?;

            let status = output.query_execution().and_then(|q| q.status());
            let state = status.and_then(|s| s.state());
            let reason = status.and_then(|s| s.state_change_reason());

            if let Some(outcome) = terminal_outcome(state, reason) {
                return outcome;
            }

            tracing::debug!(execution_id, state = ?state, "Query still running");
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

/// `None` while the query is still queued or running.
fn terminal_outcome(
    state: Option<&QueryExecutionState>,
    reason: Option<&str>,
) -> Option<Result<()>> {
    match state {
        Some(QueryExecutionState::Succeeded) => Some(Ok(())),
        Some(state @ (QueryExecutionState::Failed | QueryExecutionState::Cancelled)) => {
            Some(Err(DatalakeError::QueryFailed {
                state: state.as_str().to_string(),
                reason: reason.unwrap_or("no reason given").to_string(),
            }))
        }
        _ => None,
    }
}

fn row_cells(row: &Row) -> Vec<Option<String>> {
    row.data()
        .iter()
        .map(|datum| datum.var_char_value().map(str::to_string))
        .collect()
}
