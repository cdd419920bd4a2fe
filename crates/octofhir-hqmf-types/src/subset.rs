//! Result-subsetting operators (COUNT, FIRST, ..., LAST)

use octofhir_hqmf_diagnostics::HqmfError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::serde_helpers::falsy_as_none;
use crate::type_tags::{IVL_PQ, PQ};
use crate::{Interval, QuantityOrInterval};

/// Subset operator codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubsetOperatorType {
    Count,
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Recent,
    Last,
}

impl SubsetOperatorType {
    /// All subset operator codes
    pub const ALL: [Self; 8] = [
        Self::Count,
        Self::First,
        Self::Second,
        Self::Third,
        Self::Fourth,
        Self::Fifth,
        Self::Recent,
        Self::Last,
    ];

    /// The wire code (e.g. "FIRST")
    pub const fn as_code(&self) -> &'static str {
        match self {
            Self::Count => "COUNT",
            Self::First => "FIRST",
            Self::Second => "SECOND",
            Self::Third => "THIRD",
            Self::Fourth => "FOURTH",
            Self::Fifth => "FIFTH",
            Self::Recent => "RECENT",
            Self::Last => "LAST",
        }
    }

    /// 1-based position for FIRST through FIFTH
    pub const fn ordinal(&self) -> Option<u8> {
        match self {
            Self::First => Some(1),
            Self::Second => Some(2),
            Self::Third => Some(3),
            Self::Fourth => Some(4),
            Self::Fifth => Some(5),
            _ => None,
        }
    }
}

impl fmt::Display for SubsetOperatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for SubsetOperatorType {
    type Err = HqmfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_code() == s)
            .ok_or_else(|| HqmfError::UnknownSubsetType {
                code: s.to_string(),
            })
    }
}

/// An operator narrowing a set of matched criteria to a position or count
///
/// The value, when present, is always an `IVL_PQ` interval whose bounds are
/// typed `PQ`. A point value is widened to a zero-width inclusive interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSubsetSelector")]
pub struct SubsetSelector {
    #[serde(rename = "type")]
    operator_type: SubsetOperatorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Interval>,
}

/// Wire shape; the value on the wire is always a range
#[derive(Deserialize)]
struct RawSubsetSelector {
    #[serde(rename = "type")]
    operator_type: SubsetOperatorType,
    #[serde(default, deserialize_with = "falsy_as_none")]
    value: Option<Interval>,
}

impl From<RawSubsetSelector> for SubsetSelector {
    fn from(raw: RawSubsetSelector) -> Self {
        Self::new(raw.operator_type, raw.value.map(QuantityOrInterval::Range))
    }
}

impl SubsetSelector {
    /// Create a selector, canonicalizing the value into a typed interval
    pub fn new(operator_type: SubsetOperatorType, value: Option<QuantityOrInterval>) -> Self {
        let mut value = value.map(|input| match input {
            QuantityOrInterval::Point(mut point) => {
                log::debug!("widening {} subset value {} to a point range", operator_type, point);
                point.set_inclusive(true);
                // each bound owns its own copy
                Interval::new(Some(IVL_PQ.to_string()), Some(point.clone()), Some(point), None)
            }
            QuantityOrInterval::Range(range) => range,
        });

        if let Some(range) = value.as_mut() {
            range.default_type(IVL_PQ);
            if let Some(low) = range.low_mut() {
                low.default_type(PQ);
            }
            if let Some(high) = range.high_mut() {
                high.default_type(PQ);
            }
        }

        Self {
            operator_type,
            value,
        }
    }

    pub fn operator_type(&self) -> SubsetOperatorType {
        self.operator_type
    }

    /// The canonical interval value
    pub fn value(&self) -> Option<&Interval> {
        self.value.as_ref()
    }
}

impl fmt::Display for SubsetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operator_type)?;
        if let Some(rendered) = self.value.as_ref().and_then(|v| v.stringify().ok()) {
            write!(f, " {}", rendered)?;
        }
        Ok(())
    }
}
