//! HQMF diagnostics and error handling
//!
//! This crate provides the error handling infrastructure shared by the HQMF
//! value model and the data-criteria record, including stable error codes
//! and diagnostic reporting.

mod error;
mod error_code;

pub use error::*;
pub use error_code::*;

/// Result type for HQMF operations
pub type Result<T> = std::result::Result<T, HqmfError>;
