//! hdxutils_core - pure conversions behind the hdxutils managers.
//!
//! Nothing in this crate performs I/O. The AWS-facing shell lives in the
//! `hdxutils` crate and calls into these functions.

pub mod api;
pub mod datalake;
pub mod dynamodb;
pub mod excel;
pub mod frame;
pub mod lambda;
pub mod secrets;
