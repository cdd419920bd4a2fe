//! HQMF value types
//!
//! This crate defines the typed values used inside data-criteria
//! records:
//! - Scalar quantities and bounded ranges (`Quantity`, `Interval`, `EffectiveTime`)
//! - Coded concepts and criteria references
//! - Temporal relationships between criteria and subset operators
//! - The polymorphic criterion value (`CriteriaValue`)
//!
//! Temporal relationships and subset selectors normalize their inputs once,
//! at construction, so consumers only ever see one canonical shape.

pub mod coded;
pub mod criteria_value;
pub mod range;
pub mod reference;
pub mod serde_helpers;
pub mod subset;
pub mod temporal;
pub mod type_tags;
pub mod value;

pub use coded::CodedConcept;
pub use criteria_value::CriteriaValue;
pub use range::{EffectiveTime, Interval, QuantityOrInterval};
pub use reference::CriteriaReference;
pub use subset::{SubsetOperatorType, SubsetSelector};
pub use temporal::{INVERSIONS, TemporalRelationship, TemporalRelationshipType};
pub use value::{Quantity, QuantityRead, QuantityValue};
