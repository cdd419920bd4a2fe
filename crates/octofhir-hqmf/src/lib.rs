//! HQMF data-criteria model for Rust
//!
//! This crate provides the typed value model of HQMF measure data criteria:
//! - Quantities, ranges and coded values
//! - Temporal relationships with normalized signed offsets
//! - Subset operators with canonical interval values
//! - Data-criteria records and JSON documents
//!
//! # Example
//!
//! ```ignore
//! use octofhir_hqmf::CriteriaDocument;
//!
//! let document = CriteriaDocument::from_json(r#"{
//!   "data_criteria": {
//!     "EncounterInpatient": {
//!       "title": "Encounter, Performed: Inpatient",
//!       "temporal_references": [
//!         {"type": "SBS", "reference": "MeasurePeriod", "offset": {"value": -1, "unit": "a"}}
//!       ]
//!     }
//!   }
//! }"#)?;
//! ```

// Re-export all public APIs from internal crates
pub use octofhir_hqmf_diagnostics as diagnostics;
pub use octofhir_hqmf_model as model;
pub use octofhir_hqmf_types as types;

// Convenience re-exports
pub use octofhir_hqmf_diagnostics::{Diagnostic, ErrorCode, HqmfError, Result, Severity};
pub use octofhir_hqmf_model::{
    CriteriaDocument, CriteriaSerializer, DataCriteria, JsonSerializer, UNION, XPRODUCT,
};
pub use octofhir_hqmf_types::{
    CodedConcept, CriteriaReference, CriteriaValue, EffectiveTime, INVERSIONS, Interval, Quantity,
    QuantityOrInterval, QuantityRead, QuantityValue, SubsetOperatorType, SubsetSelector,
    TemporalRelationship, TemporalRelationshipType,
};

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
