//! S3 manager implementation.

use std::path::Path;
use std::time::Duration;

use aws_config::SdkConfig;
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::{ByteStream, DateTimeFormat};
use aws_sdk_s3::types::Object;
use aws_sdk_s3::Client;
use hdxutils_core::excel::{self, ColumnSpan};
use hdxutils_core::frame::{CsvOptions, Frame};
use serde::Serialize;
use serde_json::Value;

use super::error::{map_get_object_error, map_sdk_error, Result, S3Error};
use crate::session;

/// A listed object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectSummary {
    pub key: String,
    pub size: i64,
    /// RFC 3339 timestamp.
    pub last_modified: Option<String>,
    pub e_tag: Option<String>,
}

impl From<&Object> for ObjectSummary {
    fn from(object: &Object) -> Self {
        Self {
            key: object.key().unwrap_or_default().to_string(),
            size: object.size().unwrap_or_default(),
            last_modified: object
                .last_modified()
                .and_then(|dt| dt.fmt(DateTimeFormat::DateTime).ok()),
            e_tag: object.e_tag().map(str::to_string),
        }
    }
}

/// Object storage helpers over a bucket and key.
#[derive(Debug, Clone)]
pub struct S3Manager {
    client: Client,
}

impl S3Manager {
    pub fn new(client: Client) -> Self {
        tracing::info!("Creating instance of S3Manager");
        Self { client }
    }

    pub fn from_conf(config: &SdkConfig) -> Self {
        Self::new(Client::new(config))
    }

    pub async fn from_env() -> Self {
        Self::from_conf(session::shared_sdk_config().await)
    }

    /// Checks whether an object exists. Only a missing object yields
    /// `false`; any other failure is returned as an error.
    pub async fn file_exists(&self, bucket: &str, key: &str) -> Result<bool> {
        match self.client.head_object().bucket(bucket).key(key).send().await {
            Ok(_) => Ok(true),
            Err(err) if matches!(err.as_service_error(), Some(HeadObjectError::NotFound(_))) => {
                Ok(false)
            }
            Err(err) => Err(map_sdk_error(err, "HeadObject")),
        }
    }

    /// Lists every object under `prefix`, following continuation tokens.
    pub async fn list_files(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectSummary>> {
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix)
            .into_paginator()
            .send();

        let mut objects = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| map_sdk_error(e, "ListObjectsV2"))?;
            objects.extend(page.contents().iter().map(ObjectSummary::from));
        }

        tracing::debug!(bucket, prefix, count = objects.len(), "Listed objects");
        Ok(objects)
    }

    /// Writes `body` to `bucket/key`.
    pub async fn save(&self, bucket: &str, key: &str, body: impl Into<ByteStream>) -> Result<()> {
        tracing::debug!(bucket, key, "Saving object");

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body.into())
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "PutObject"))?;

        Ok(())
    }

    /// Writes a frame as CSV.
    pub async fn save_frame(
        &self,
        bucket: &str,
        key: &str,
        frame: &Frame,
        options: &CsvOptions,
    ) -> Result<()> {
        let csv = frame.to_csv(options)?;
        self.save(bucket, key, csv).await
    }

    /// Reads a whole object into memory.
    pub async fn read_bytes(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| map_get_object_error(e, bucket, key))?;

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| S3Error::Body(e.to_string()))?;

        Ok(body.into_bytes().to_vec())
    }

    /// Reads an object as JSON.
    pub async fn read_json(&self, bucket: &str, key: &str) -> Result<Value> {
        let bytes = self.read_bytes(bucket, key).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Reads an object as CSV with a header row.
    pub async fn read_csv(&self, bucket: &str, key: &str, delimiter: u8) -> Result<Frame> {
        let bytes = self.read_bytes(bucket, key).await?;
        Ok(Frame::from_csv(bytes.as_slice(), delimiter)?)
    }

    /// Lists the sheet names of an Excel workbook.
    pub async fn read_excel(&self, bucket: &str, key: &str) -> Result<Vec<String>> {
        let bytes = self.read_bytes(bucket, key).await?;
        Ok(excel::sheet_names(&bytes)?)
    }

    /// Reads one sheet of an Excel workbook. The first `skip_header` rows
    /// are skipped and the next row is the header.
    pub async fn read_excel_sheet(
        &self,
        bucket: &str,
        key: &str,
        sheet: &str,
        skip_header: u32,
        columns: ColumnSpan,
    ) -> Result<Frame> {
        tracing::debug!(bucket, key, sheet, "Reading Excel sheet");

        let bytes = self.read_bytes(bucket, key).await?;
        Ok(excel::read_sheet(&bytes, sheet, skip_header, columns)?)
    }

    /// Returns a presigned GET URL valid for `expires`.
    pub async fn download_url(&self, bucket: &str, key: &str, expires: Duration) -> Result<String> {
        let presigning =
            PresigningConfig::expires_in(expires).map_err(|e| S3Error::Presign(e.to_string()))?;

        let request = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| map_sdk_error(e, "GetObject"))?;

        Ok(request.uri().to_string())
    }

    /// Uploads a local file.
    pub async fn upload_file(&self, bucket: &str, path: &Path, key: &str) -> Result<()> {
        tracing::info!(bucket, key, path = %path.display(), "Uploading file");

        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| S3Error::LocalFile(format!("{}: {e}", path.display())))?;

        self.save(bucket, key, body).await
    }

    /// Uploads an in-memory buffer.
    pub async fn upload_buffer(&self, bucket: &str, buffer: Vec<u8>, key: &str) -> Result<()> {
        self.save(bucket, key, buffer).await
    }
}
