//! HQMF data-criteria records and documents
//!
//! This crate provides:
//! - The `DataCriteria` record aggregating typed values, effective time,
//!   temporal references and subset operators
//! - `CriteriaDocument`, an ordered map of criteria keyed by id
//! - JSON serialization through the `CriteriaSerializer` trait

pub mod data_criteria;
pub mod document;
pub mod serialize;

pub use data_criteria::{DataCriteria, UNION, XPRODUCT};
pub use document::CriteriaDocument;
pub use serialize::{CriteriaSerializer, JsonSerializer};
