//! Client for the internal HTTP API.

mod error;
mod manager;

pub use error::{ApiError, Result};
pub use manager::ApiManager;
