//! Well-known HQMF data type tags
//!
//! These are the `type` discriminators that appear on values in criteria
//! JSON and the defaults that normalization fills in.

/// Physical quantity
pub const PQ: &str = "PQ";
/// Timestamp
pub const TS: &str = "TS";
/// Interval of physical quantities
pub const IVL_PQ: &str = "IVL_PQ";
/// Interval of timestamps
pub const IVL_TS: &str = "IVL_TS";
/// Coded value
pub const CD: &str = "CD";
