//! SQL queries against the datalake through Athena.

mod error;
mod manager;

pub use error::{DatalakeError, Result};
pub use manager::DatalakeManager;
