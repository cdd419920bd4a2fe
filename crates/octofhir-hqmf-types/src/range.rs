//! Bounded ranges
//!
//! An `Interval` is built from up to three quantities: `low`, `high` and
//! `width`. `EffectiveTime` is the timestamp specialization whose type tag
//! is fixed to `IVL_TS`.

use octofhir_hqmf_diagnostics::{HqmfError, Result};
use serde::{Deserialize, Serialize};

use crate::Quantity;
use crate::serde_helpers::falsy_as_none;
use crate::type_tags::IVL_TS;

/// A range of physical quantities or timestamps
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Interval {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "falsy_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    interval_type: Option<String>,
    #[serde(default, deserialize_with = "falsy_as_none", skip_serializing_if = "Option::is_none")]
    low: Option<Quantity>,
    #[serde(default, deserialize_with = "falsy_as_none", skip_serializing_if = "Option::is_none")]
    high: Option<Quantity>,
    #[serde(default, deserialize_with = "falsy_as_none", skip_serializing_if = "Option::is_none")]
    width: Option<Quantity>,
}

impl Interval {
    /// Create a new interval
    pub fn new(
        interval_type: Option<String>,
        low: Option<Quantity>,
        high: Option<Quantity>,
        width: Option<Quantity>,
    ) -> Self {
        Self {
            interval_type,
            low,
            high,
            width,
        }
    }

    pub fn with_type(mut self, interval_type: impl Into<String>) -> Self {
        self.interval_type = Some(interval_type.into());
        self
    }

    pub fn with_low(mut self, low: Quantity) -> Self {
        self.low = Some(low);
        self
    }

    pub fn with_high(mut self, high: Quantity) -> Self {
        self.high = Some(high);
        self
    }

    pub fn with_width(mut self, width: Quantity) -> Self {
        self.width = Some(width);
        self
    }

    /// Type tag (e.g. "IVL_PQ")
    pub fn interval_type(&self) -> Option<&str> {
        self.interval_type.as_deref()
    }

    /// Fill in the type tag if it is unset; a set tag is never overwritten
    pub fn default_type(&mut self, interval_type: &str) {
        self.interval_type
            .get_or_insert_with(|| interval_type.to_string());
    }

    pub fn low(&self) -> Option<&Quantity> {
        self.low.as_ref()
    }

    pub fn low_mut(&mut self) -> Option<&mut Quantity> {
        self.low.as_mut()
    }

    pub fn high(&self) -> Option<&Quantity> {
        self.high.as_ref()
    }

    pub fn high_mut(&mut self) -> Option<&mut Quantity> {
        self.high.as_mut()
    }

    pub fn width(&self) -> Option<&Quantity> {
        self.width.as_ref()
    }

    /// Split into `(low, high, width)`
    pub fn into_bounds(self) -> (Option<Quantity>, Option<Quantity>, Option<Quantity>) {
        (self.low, self.high, self.width)
    }

    /// Check if this is a point range (equal values, both bounds inclusive)
    pub fn is_point(&self) -> bool {
        is_point(self.low.as_ref(), self.high.as_ref())
    }

    /// Human-readable form of the bounds
    ///
    /// Fails when neither `low` nor `high` is present. `width` never takes
    /// part in the rendering.
    pub fn stringify(&self) -> Result<String> {
        describe_bounds(self.low.as_ref(), self.high.as_ref())
    }
}

/// Timestamp range whose type tag is always `IVL_TS`
///
/// The tag is a constant rather than stored state, so whatever tag the
/// source JSON carried, the effective time reports and emits `IVL_TS`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(into = "Interval", from = "Interval")]
pub struct EffectiveTime {
    low: Option<Quantity>,
    high: Option<Quantity>,
    width: Option<Quantity>,
}

impl EffectiveTime {
    /// Create a new effective time
    pub fn new(low: Option<Quantity>, high: Option<Quantity>, width: Option<Quantity>) -> Self {
        Self { low, high, width }
    }

    /// Always `IVL_TS`
    pub fn interval_type(&self) -> &'static str {
        IVL_TS
    }

    pub fn low(&self) -> Option<&Quantity> {
        self.low.as_ref()
    }

    pub fn high(&self) -> Option<&Quantity> {
        self.high.as_ref()
    }

    pub fn width(&self) -> Option<&Quantity> {
        self.width.as_ref()
    }

    pub fn is_point(&self) -> bool {
        is_point(self.low.as_ref(), self.high.as_ref())
    }

    /// Human-readable form of the bounds, same rules as `Interval::stringify`
    pub fn stringify(&self) -> Result<String> {
        describe_bounds(self.low.as_ref(), self.high.as_ref())
    }
}

impl From<EffectiveTime> for Interval {
    fn from(time: EffectiveTime) -> Self {
        Interval::new(Some(IVL_TS.to_string()), time.low, time.high, time.width)
    }
}

impl From<Interval> for EffectiveTime {
    fn from(interval: Interval) -> Self {
        let (low, high, width) = interval.into_bounds();
        EffectiveTime::new(low, high, width)
    }
}

/// Constructor input that may be a single point or a range
///
/// Temporal relationships and subset selectors accept either shape and
/// collapse it into their canonical form at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityOrInterval {
    /// A single quantity
    Point(Quantity),
    /// A range of quantities
    Range(Interval),
}

impl From<Quantity> for QuantityOrInterval {
    fn from(quantity: Quantity) -> Self {
        Self::Point(quantity)
    }
}

impl From<Interval> for QuantityOrInterval {
    fn from(interval: Interval) -> Self {
        Self::Range(interval)
    }
}

fn is_point(low: Option<&Quantity>, high: Option<&Quantity>) -> bool {
    match (low, high) {
        (Some(low), Some(high)) => {
            low.value() == high.value() && low.is_inclusive() && high.is_inclusive()
        }
        _ => false,
    }
}

fn describe_bounds(low: Option<&Quantity>, high: Option<&Quantity>) -> Result<String> {
    match (low, high) {
        (Some(low), Some(high)) if is_point(Some(low), Some(high)) => Ok(low.stringify()),
        (Some(low), Some(high)) => Ok(format!(">{} and <{}", low, high)),
        (None, Some(high)) => Ok(format!("<{}", high)),
        (Some(low), None) => Ok(format!(">{}", low)),
        (None, None) => Err(HqmfError::conversion("range")),
    }
}
