//! Polymorphic criterion value
//!
//! A data criterion's `value` is a timestamp, a physical-quantity range or a
//! code. Parsing dispatches on the explicit `type` discriminator, never on the
//! shape of the object.

use octofhir_hqmf_diagnostics::{HqmfError, Result};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::borrow::Cow;

use crate::serde_helpers::is_falsy;
use crate::type_tags::{CD, IVL_PQ, TS};
use crate::{CodedConcept, Interval, Quantity, QuantityRead, QuantityValue};

/// The value of a data criterion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CriteriaValue {
    /// `TS` value
    Quantity(Quantity),
    /// `IVL_PQ` value
    Interval(Interval),
    /// `CD` value
    Coded(CodedConcept),
}

impl CriteriaValue {
    /// Parse from JSON, dispatching on the `type` field
    pub fn from_json(json: &Value) -> Result<Self> {
        let type_tag = json.get("type").and_then(Value::as_str).unwrap_or_default();
        log::trace!("parsing criteria value of type [{}]", type_tag);

        match type_tag {
            TS => Ok(Self::Quantity(Quantity::deserialize(json)?)),
            IVL_PQ => Ok(Self::Interval(Interval::deserialize(json)?)),
            CD => Ok(Self::Coded(CodedConcept::deserialize(json)?)),
            other => Err(HqmfError::unknown_value_type(other)),
        }
    }

    /// Parse an optional value; `null` and `false` mean no value
    pub fn from_optional_json(json: &Value) -> Result<Option<Self>> {
        if is_falsy(json) {
            return Ok(None);
        }
        Self::from_json(json).map(Some)
    }

    /// The type tag carried by the wrapped value
    pub fn type_tag(&self) -> Option<&str> {
        match self {
            Self::Quantity(q) => q.quantity_type(),
            Self::Interval(i) => i.interval_type(),
            Self::Coded(c) => c.coded_type(),
        }
    }

    pub fn as_quantity(&self) -> Option<&Quantity> {
        match self {
            Self::Quantity(q) => Some(q),
            _ => None,
        }
    }

    pub fn as_interval(&self) -> Option<&Interval> {
        match self {
            Self::Interval(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_coded(&self) -> Option<&CodedConcept> {
        match self {
            Self::Coded(c) => Some(c),
            _ => None,
        }
    }

    /// Human-readable form
    ///
    /// Ranges follow `Interval::stringify` and may fail; codes render as
    /// their code.
    pub fn stringify(&self) -> Result<String> {
        match self {
            Self::Quantity(q) => Ok(q.stringify()),
            Self::Interval(i) => i.stringify(),
            Self::Coded(c) => c
                .code()
                .map(str::to_string)
                .ok_or_else(|| HqmfError::conversion("code")),
        }
    }
}

impl QuantityRead for CriteriaValue {
    fn read_value(&self) -> Option<Cow<'_, QuantityValue>> {
        match self {
            Self::Quantity(q) => q.read_value(),
            Self::Interval(_) => None,
            Self::Coded(c) => c.read_value(),
        }
    }

    fn read_unit(&self) -> Option<&str> {
        match self {
            Self::Quantity(q) => q.read_unit(),
            Self::Interval(_) => None,
            Self::Coded(c) => c.read_unit(),
        }
    }

    fn read_derived(&self) -> bool {
        match self {
            Self::Quantity(q) => q.read_derived(),
            Self::Interval(_) => false,
            Self::Coded(c) => c.read_derived(),
        }
    }
}

impl From<Quantity> for CriteriaValue {
    fn from(value: Quantity) -> Self {
        Self::Quantity(value)
    }
}

impl From<Interval> for CriteriaValue {
    fn from(value: Interval) -> Self {
        Self::Interval(value)
    }
}

impl From<CodedConcept> for CriteriaValue {
    fn from(value: CodedConcept) -> Self {
        Self::Coded(value)
    }
}

impl<'de> Deserialize<'de> for CriteriaValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let json = Value::deserialize(deserializer)?;
        Self::from_json(&json).map_err(de::Error::custom)
    }
}
