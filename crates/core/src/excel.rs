//! Excel workbooks read from memory into frames.

use std::io::Cursor;
use std::str::FromStr;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use thiserror::Error;

use crate::frame::{Frame, FrameError};

/// Errors that can occur while reading a workbook.
#[derive(Debug, Error)]
pub enum ExcelError {
    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("Invalid column span: {0}")]
    InvalidColumns(String),
    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Result type for workbook operations.
pub type Result<T> = std::result::Result<T, ExcelError>;

/// Inclusive span of sheet columns, zero-based. Parsed from letters such as
/// `"A:Z"` or a single column `"C"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    pub first: u32,
    pub last: u32,
}

impl Default for ColumnSpan {
    /// `A:Z`
    fn default() -> Self {
        Self { first: 0, last: 25 }
    }
}

impl FromStr for ColumnSpan {
    type Err = ExcelError;

    fn from_str(s: &str) -> Result<Self> {
        let (first, last) = s.split_once(':').unwrap_or((s, s));
        let invalid = || ExcelError::InvalidColumns(s.to_string());

        let first = column_index(first).ok_or_else(invalid)?;
        let last = column_index(last).ok_or_else(invalid)?;
        if first > last {
            return Err(invalid());
        }
        Ok(Self { first, last })
    }
}

/// Zero-based index of a column name: `A` is 0, `Z` is 25, `AA` is 26.
pub fn column_index(letters: &str) -> Option<u32> {
    let letters = letters.trim();
    if letters.is_empty() {
        return None;
    }

    letters
        .chars()
        .try_fold(0u32, |acc, c| {
            if !c.is_ascii_alphabetic() {
                return None;
            }
            let digit = u32::from(c.to_ascii_uppercase()) - u32::from('A') + 1;
            acc.checked_mul(26)?.checked_add(digit)
        })
        .map(|n| n - 1)
}

/// Names of the sheets in a workbook, in workbook order.
pub fn sheet_names(bytes: &[u8]) -> Result<Vec<String>> {
    let workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    Ok(workbook.sheet_names())
}

/// Read one sheet of a workbook into a frame. See [`frame_from_range`].
pub fn read_sheet(
    bytes: &[u8],
    sheet: &str,
    skip_header: u32,
    columns: ColumnSpan,
) -> Result<Frame> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook.worksheet_range(sheet)?;
    frame_from_range(&range, skip_header, columns)
}

/// Build a frame from sheet cells.
///
/// The first `skip_header` rows are skipped and the next row names the
/// columns. Positions are absolute, so row 0 and column `A` are the sheet's
/// first row and column even when the used range starts further in. Columns
/// past the last used one are dropped; empty cells become empty strings.
pub fn frame_from_range(
    range: &Range<Data>,
    skip_header: u32,
    columns: ColumnSpan,
) -> Result<Frame> {
    let Some((last_row, last_col)) = range.end() else {
        return Ok(Frame::default());
    };
    if skip_header > last_row || columns.first > last_col {
        return Ok(Frame::default());
    }

    let span = columns.first..=columns.last.min(last_col);
    let cell = |row: u32, col: u32| {
        range
            .get_value((row, col))
            .map(ToString::to_string)
            .unwrap_or_default()
    };

    let mut frame = Frame::new(span.clone().map(|col| cell(skip_header, col)).collect());
    for row in skip_header + 1..=last_row {
        frame.push_row(span.clone().map(|col| cell(row, col)).collect())?;
    }
    Ok(frame)
}
