//! A small tabular frame with CSV input and output.
//!
//! Cells are kept as strings; typing is left to the caller.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::dynamodb::Record;

/// Errors that can occur while building or (de)serializing a frame.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Row has {found} cells, expected {expected}")]
    RowWidth { expected: usize, found: usize },
    #[error("Failed to flush CSV output: {0}")]
    Flush(String),
}

/// Result type for frame operations.
pub type Result<T> = std::result::Result<T, FrameError>;

/// CSV layout options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: u8,
    /// Write the header row.
    pub header: bool,
    /// Write a leading row-number column.
    pub index: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            header: true,
            index: false,
        }
    }
}

impl CsvOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Column names plus rows of string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Frame {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a frame from result rows whose first row is the header.
    /// Missing cells become empty strings.
    pub fn from_header_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<Option<String>>>,
    {
        let mut rows = rows.into_iter();
        let Some(header) = rows.next() else {
            return Ok(Self::default());
        };

        let mut frame = Self::new(header.into_iter().map(Option::unwrap_or_default).collect());
        for row in rows {
            frame.push_row(row.into_iter().map(Option::unwrap_or_default).collect())?;
        }
        Ok(frame)
    }

    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(FrameError::RowWidth {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of cells (rows times columns).
    pub fn size(&self) -> usize {
        self.rows.len() * self.columns.len()
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Rows as records keyed by column name.
    pub fn to_records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned().map(Value::String))
                    .collect()
            })
            .collect()
    }

    /// Read CSV with a header row.
    pub fn from_csv<R: std::io::Read>(reader: R, delimiter: u8) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_reader(reader);

        let columns = reader.headers()?.iter().map(str::to_string).collect();
        let mut frame = Self::new(columns);
        for record in reader.records() {
            let record = record?;
            frame.push_row(record.iter().map(str::to_string).collect())?;
        }
        Ok(frame)
    }

    /// Write CSV into a byte buffer.
    pub fn to_csv(&self, options: &CsvOptions) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .from_writer(Vec::new());

        if options.header {
            if options.index {
                writer.write_field("")?;
            }
            writer.write_record(&self.columns)?;
        }

        for (position, row) in self.rows.iter().enumerate() {
            if options.index {
                writer.write_field(position.to_string())?;
            }
            writer.write_record(row)?;
        }

        writer
            .into_inner()
            .map_err(|e| FrameError::Flush(e.to_string()))
    }
}
