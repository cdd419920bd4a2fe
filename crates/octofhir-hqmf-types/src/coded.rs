//! Coded values

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::serde_helpers::falsy_as_none;
use crate::{QuantityRead, QuantityValue};

/// A code from a code system (an HQMF `CD` value)
///
/// Reads like a quantity whose value is the code, with no unit, and which is
/// never derived.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CodedConcept {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "falsy_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    coded_type: Option<String>,
    #[serde(default, deserialize_with = "falsy_as_none", skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(default, deserialize_with = "falsy_as_none", skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl CodedConcept {
    /// Create a new coded concept
    pub fn new(coded_type: Option<String>, system: Option<String>, code: Option<String>) -> Self {
        Self {
            coded_type,
            system,
            code,
        }
    }

    pub fn coded_type(&self) -> Option<&str> {
        self.coded_type.as_deref()
    }

    /// Code system identifier (OID or URI)
    pub fn system(&self) -> Option<&str> {
        self.system.as_deref()
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// The code, read as a value
    pub fn value(&self) -> Option<&str> {
        self.code()
    }

    /// Always `None`
    pub fn unit(&self) -> Option<&str> {
        None
    }

    /// Always `false`
    pub fn is_derived(&self) -> bool {
        false
    }
}

impl QuantityRead for CodedConcept {
    fn read_value(&self) -> Option<Cow<'_, QuantityValue>> {
        self.code
            .as_ref()
            .map(|code| Cow::Owned(QuantityValue::Text(code.clone())))
    }

    fn read_unit(&self) -> Option<&str> {
        self.unit()
    }

    fn read_derived(&self) -> bool {
        self.is_derived()
    }
}
