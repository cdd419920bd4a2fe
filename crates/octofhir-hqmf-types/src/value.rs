//! Scalar quantities
//!
//! A `Quantity` is the leaf of the value model: one scalar with a type tag,
//! an optional unit and inclusive/derived flags. Ranges, temporal offsets and
//! subset operators are all built from it.

use octofhir_hqmf_diagnostics::{HqmfError, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::serde_helpers::{falsy_as_false, falsy_as_none, is_false};

/// The raw value of a quantity: a number or an opaque string
///
/// Timestamps and other non-numeric values stay textual. Text that happens
/// to hold a decimal still compares and negates numerically.
#[derive(Debug, Clone)]
pub enum QuantityValue {
    /// Numeric value
    Number(Decimal),
    /// Textual value (e.g. a timestamp such as "20100101")
    Text(String),
}

impl QuantityValue {
    /// Numeric reading of this value, if it has one
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Number(d) => Some(*d),
            Self::Text(s) => Decimal::from_str(s.trim()).ok(),
        }
    }

    /// Try to get as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    /// Multiply the numeric reading by -1
    pub fn negated(&self) -> Result<Self> {
        self.as_decimal()
            .map(|d| Self::Number(-d))
            .ok_or_else(|| HqmfError::NonNumericOffset {
                value: self.to_string(),
            })
    }
}

impl PartialEq for QuantityValue {
    fn eq(&self, other: &Self) -> bool {
        match (self.as_decimal(), other.as_decimal()) {
            (Some(a), Some(b)) => a == b,
            _ => match (self, other) {
                (Self::Text(a), Self::Text(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl fmt::Display for QuantityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(d) => write!(f, "{}", d),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<Decimal> for QuantityValue {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for QuantityValue {
    fn from(value: i32) -> Self {
        Self::Number(Decimal::from(value))
    }
}

impl From<i64> for QuantityValue {
    fn from(value: i64) -> Self {
        Self::Number(Decimal::from(value))
    }
}

impl From<&str> for QuantityValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QuantityValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl Serialize for QuantityValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            // Integral numbers go out as JSON integers
            Self::Number(d) if d.fract().is_zero() => match d.to_i64() {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_str(&d.to_string()),
            },
            // Fractions beyond f64 precision go out as text
            Self::Number(d) => {
                let exact = d
                    .to_f64()
                    .filter(|f| Decimal::from_str(&f.to_string()).ok() == Some(*d));
                match exact {
                    Some(f) => serializer.serialize_f64(f),
                    None => serializer.serialize_str(&d.to_string()),
                }
            }
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for QuantityValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct QuantityValueVisitor;

        impl Visitor<'_> for QuantityValueVisitor {
            type Value = QuantityValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number or a string")
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(QuantityValue::Number(Decimal::from(value)))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(QuantityValue::Number(Decimal::from(value)))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                // Shortest round-trip text keeps 0.1 as 0.1
                let text = value.to_string();
                match Decimal::from_str(&text) {
                    Ok(d) => Ok(QuantityValue::Number(d)),
                    Err(_) => Ok(QuantityValue::Text(text)),
                }
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(QuantityValue::Text(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(QuantityValue::Text(value))
            }
        }

        deserializer.deserialize_any(QuantityValueVisitor)
    }
}

/// Read-only view shared by everything that can stand in for a quantity
///
/// Coded concepts and polymorphic criterion values implement this so that
/// callers reading `value`/`unit`/`derived?` need not care which shape they
/// hold.
pub trait QuantityRead {
    /// The value, if any
    fn read_value(&self) -> Option<Cow<'_, QuantityValue>>;
    /// The unit, if any
    fn read_unit(&self) -> Option<&str>;
    /// Whether the value was derived rather than stated
    fn read_derived(&self) -> bool;
}

/// A bound within a physical quantity or timestamp range
///
/// `inclusive?` and `derived?` treat absence as false; they are emitted in
/// JSON only when set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Quantity {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "falsy_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    quantity_type: Option<String>,
    #[serde(default, deserialize_with = "falsy_as_none", skip_serializing_if = "Option::is_none")]
    unit: Option<String>,
    #[serde(default, deserialize_with = "falsy_as_none", skip_serializing_if = "Option::is_none")]
    value: Option<QuantityValue>,
    #[serde(
        rename = "inclusive?",
        default,
        deserialize_with = "falsy_as_false",
        skip_serializing_if = "is_false"
    )]
    inclusive: bool,
    #[serde(
        rename = "derived?",
        default,
        deserialize_with = "falsy_as_false",
        skip_serializing_if = "is_false"
    )]
    derived: bool,
    #[serde(default, deserialize_with = "falsy_as_none", skip_serializing_if = "Option::is_none")]
    expression: Option<String>,
}

impl Quantity {
    /// Create a new quantity from all of its fields
    pub fn new(
        quantity_type: Option<String>,
        unit: Option<String>,
        value: Option<QuantityValue>,
        inclusive: bool,
        derived: bool,
        expression: Option<String>,
    ) -> Self {
        Self {
            quantity_type,
            unit,
            value,
            inclusive,
            derived,
            expression,
        }
    }

    /// Create an untyped, exclusive quantity holding just a value
    pub fn from_value(value: impl Into<QuantityValue>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, quantity_type: impl Into<String>) -> Self {
        self.quantity_type = Some(quantity_type.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_inclusive(mut self, inclusive: bool) -> Self {
        self.inclusive = inclusive;
        self
    }

    pub fn with_derived(mut self, derived: bool) -> Self {
        self.derived = derived;
        self
    }

    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }

    /// Type tag (e.g. "PQ", "TS")
    pub fn quantity_type(&self) -> Option<&str> {
        self.quantity_type.as_deref()
    }

    /// Fill in the type tag if it is unset; a set tag is never overwritten
    pub fn default_type(&mut self, quantity_type: &str) {
        self.quantity_type
            .get_or_insert_with(|| quantity_type.to_string());
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn value(&self) -> Option<&QuantityValue> {
        self.value.as_ref()
    }

    pub fn set_value(&mut self, value: Option<QuantityValue>) {
        self.value = value;
    }

    /// Whether the bound includes its endpoint
    pub fn is_inclusive(&self) -> bool {
        self.inclusive
    }

    pub fn set_inclusive(&mut self, inclusive: bool) {
        self.inclusive = inclusive;
    }

    pub fn is_derived(&self) -> bool {
        self.derived
    }

    pub fn expression(&self) -> Option<&str> {
        self.expression.as_deref()
    }

    /// Human-readable form: `=` when inclusive, the value, then ` unit`
    pub fn stringify(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inclusive {
            write!(f, "=")?;
        }
        if let Some(value) = &self.value {
            write!(f, "{}", value)?;
        }
        if let Some(unit) = &self.unit {
            write!(f, " {}", unit)?;
        }
        Ok(())
    }
}

impl QuantityRead for Quantity {
    fn read_value(&self) -> Option<Cow<'_, QuantityValue>> {
        self.value.as_ref().map(Cow::Borrowed)
    }

    fn read_unit(&self) -> Option<&str> {
        self.unit()
    }

    fn read_derived(&self) -> bool {
        self.derived
    }
}
