//! Lambda function invoker.

mod error;
mod manager;

pub use error::{LambdaError, Result};
pub use manager::LambdaManager;
