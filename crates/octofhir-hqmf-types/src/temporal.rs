//! Temporal relationships between data criteria
//!
//! A relationship such as "starts before start of" ties the owning criterion
//! to a referenced one, optionally with a signed offset. Upstream data may
//! express "5 days before" either as a signed point or as a one-sided range;
//! construction folds both into a single signed quantity.

use octofhir_hqmf_diagnostics::{HqmfError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::serde_helpers::falsy_as_none;
use crate::type_tags::PQ;
use crate::{CriteriaReference, Quantity, QuantityOrInterval};

/// Timing relationship codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TemporalRelationshipType {
    /// During
    During,
    /// Starts before start of
    Sbs,
    /// Starts after start of
    Sas,
    /// Starts before end of
    Sbe,
    /// Starts after end of
    Sae,
    /// Ends before start of
    Ebs,
    /// Ends after start of
    Eas,
    /// Ends before end of
    Ebe,
    /// Ends after end of
    Eae,
    /// Starts during
    Sdu,
    /// Ends during
    Edu,
    /// Ends concurrent with
    Ecw,
    /// Starts concurrent with
    Scw,
    /// Concurrent with
    Concurrent,
}

/// Direction flips used when subject and reference swap places
///
/// Every entry's inverse is also in the table, so inverting twice returns
/// the original code.
pub const INVERSIONS: [(TemporalRelationshipType, TemporalRelationshipType); 8] = [
    (TemporalRelationshipType::Sbs, TemporalRelationshipType::Eae),
    (TemporalRelationshipType::Eae, TemporalRelationshipType::Sbs),
    (TemporalRelationshipType::Sas, TemporalRelationshipType::Ebe),
    (TemporalRelationshipType::Ebe, TemporalRelationshipType::Sas),
    (TemporalRelationshipType::Sbe, TemporalRelationshipType::Eas),
    (TemporalRelationshipType::Eas, TemporalRelationshipType::Sbe),
    (TemporalRelationshipType::Sae, TemporalRelationshipType::Ebs),
    (TemporalRelationshipType::Ebs, TemporalRelationshipType::Sae),
];

impl TemporalRelationshipType {
    /// All relationship codes
    pub const ALL: [Self; 14] = [
        Self::During,
        Self::Sbs,
        Self::Sas,
        Self::Sbe,
        Self::Sae,
        Self::Ebs,
        Self::Eas,
        Self::Ebe,
        Self::Eae,
        Self::Sdu,
        Self::Edu,
        Self::Ecw,
        Self::Scw,
        Self::Concurrent,
    ];

    /// The wire code (e.g. "SBS")
    pub const fn as_code(&self) -> &'static str {
        match self {
            Self::During => "DURING",
            Self::Sbs => "SBS",
            Self::Sas => "SAS",
            Self::Sbe => "SBE",
            Self::Sae => "SAE",
            Self::Ebs => "EBS",
            Self::Eas => "EAS",
            Self::Ebe => "EBE",
            Self::Eae => "EAE",
            Self::Sdu => "SDU",
            Self::Edu => "EDU",
            Self::Ecw => "ECW",
            Self::Scw => "SCW",
            Self::Concurrent => "CONCURRENT",
        }
    }

    /// Logical opposite from the inversion table, if this code has one
    pub fn inverse(self) -> Option<Self> {
        INVERSIONS
            .iter()
            .find(|(from, _)| *from == self)
            .map(|(_, to)| *to)
    }
}

impl fmt::Display for TemporalRelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for TemporalRelationshipType {
    type Err = HqmfError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_code() == s)
            .ok_or_else(|| HqmfError::UnknownTemporalType {
                code: s.to_string(),
            })
    }
}

/// A timing constraint between the owning criterion and a referenced one
///
/// The offset, once constructed, is always a single quantity with its type
/// tag set (`PQ` unless the source said otherwise).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTemporalRelationship")]
pub struct TemporalRelationship {
    #[serde(rename = "type")]
    relationship_type: TemporalRelationshipType,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference: Option<CriteriaReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<Quantity>,
}

/// Wire shape; the offset on the wire is always a point
#[derive(Deserialize)]
struct RawTemporalRelationship {
    #[serde(rename = "type")]
    relationship_type: TemporalRelationshipType,
    #[serde(default, deserialize_with = "falsy_as_none")]
    reference: Option<CriteriaReference>,
    #[serde(default, deserialize_with = "falsy_as_none")]
    offset: Option<Quantity>,
}

impl TryFrom<RawTemporalRelationship> for TemporalRelationship {
    type Error = HqmfError;

    fn try_from(raw: RawTemporalRelationship) -> Result<Self> {
        Self::new(
            raw.relationship_type,
            raw.reference,
            raw.offset.map(QuantityOrInterval::Point),
        )
    }
}

impl TemporalRelationship {
    /// Create a relationship, normalizing the offset
    ///
    /// A range offset with only `high` becomes its negated high bound
    /// ("before"); one with only `low` becomes the low bound ("after"); one
    /// with neither leaves the offset unset. A range with both bounds is
    /// rejected.
    pub fn new(
        relationship_type: TemporalRelationshipType,
        reference: Option<CriteriaReference>,
        offset: Option<QuantityOrInterval>,
    ) -> Result<Self> {
        let offset = match offset {
            Some(input) => normalize_offset(input)?,
            None => None,
        };

        Ok(Self {
            relationship_type,
            reference,
            offset,
        })
    }

    pub fn relationship_type(&self) -> TemporalRelationshipType {
        self.relationship_type
    }

    pub fn reference(&self) -> Option<&CriteriaReference> {
        self.reference.as_ref()
    }

    /// The normalized signed offset
    pub fn offset(&self) -> Option<&Quantity> {
        self.offset.as_ref()
    }
}

impl fmt::Display for TemporalRelationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.relationship_type)?;
        if let Some(reference) = &self.reference {
            write!(f, " {}", reference)?;
        }
        if let Some(offset) = &self.offset {
            write!(f, " (offset {})", offset)?;
        }
        Ok(())
    }
}

fn normalize_offset(input: QuantityOrInterval) -> Result<Option<Quantity>> {
    let mut resolved = match input {
        QuantityOrInterval::Point(quantity) => Some(quantity),
        QuantityOrInterval::Range(range) => match range.into_bounds() {
            (Some(_), Some(_), _) => return Err(HqmfError::CombinedOffsetBound),
            (None, Some(mut high), _) => {
                if let Some(value) = high.value() {
                    let negated = value.negated()?;
                    log::debug!("folding offset high bound {} into {}", value, negated);
                    high.set_value(Some(negated));
                }
                Some(high)
            }
            (Some(low), None, _) => Some(low),
            (None, None, _) => None,
        },
    };

    if let Some(offset) = resolved.as_mut() {
        offset.default_type(PQ);
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Interval, QuantityValue};
    use serde_json::json;

    fn relationship(offset: impl Into<QuantityOrInterval>) -> Result<TemporalRelationship> {
        TemporalRelationship::new(
            TemporalRelationshipType::Sbs,
            Some(CriteriaReference::new("Encounter")),
            Some(offset.into()),
        )
    }

    #[test]
    fn test_high_bound_is_negated() {
        let range = Interval::default().with_high(Quantity::from_value(5).with_unit("d"));
        let rel = relationship(range).unwrap();

        let offset = rel.offset().unwrap();
        assert_eq!(offset.value(), Some(&QuantityValue::from(-5)));
        assert_eq!(offset.unit(), Some("d"));
        assert_eq!(offset.quantity_type(), Some("PQ"));
    }

    #[test]
    fn test_low_bound_is_kept() {
        let range = Interval::default().with_low(Quantity::from_value(5));
        let rel = relationship(range).unwrap();
        assert_eq!(rel.offset().unwrap().value(), Some(&QuantityValue::from(5)));
    }

    #[test]
    fn test_both_bounds_rejected() {
        let range = Interval::default()
            .with_low(Quantity::from_value(1))
            .with_high(Quantity::from_value(2));
        assert_eq!(relationship(range).unwrap_err(), HqmfError::CombinedOffsetBound);
    }

    #[test]
    fn test_empty_range_leaves_offset_unset() {
        let rel = relationship(Interval::default()).unwrap();
        assert!(rel.offset().is_none());
    }

    #[test]
    fn test_point_keeps_its_type() {
        let rel = relationship(Quantity::from_value(3).with_type("TS")).unwrap();
        assert_eq!(rel.offset().unwrap().quantity_type(), Some("TS"));
    }

    #[test]
    fn test_inversion_table() {
        assert_eq!(
            TemporalRelationshipType::Sbs.inverse(),
            Some(TemporalRelationshipType::Eae)
        );
        assert_eq!(TemporalRelationshipType::During.inverse(), None);
        for (from, to) in INVERSIONS {
            assert_eq!(to.inverse(), Some(from));
        }
    }

    #[test]
    fn test_code_parsing() {
        assert_eq!(
            "CONCURRENT".parse::<TemporalRelationshipType>().unwrap(),
            TemporalRelationshipType::Concurrent
        );
        assert!(matches!(
            "SOON".parse::<TemporalRelationshipType>(),
            Err(HqmfError::UnknownTemporalType { .. })
        ));
        for code in TemporalRelationshipType::ALL {
            assert_eq!(serde_json::to_value(code).unwrap(), json!(code.as_code()));
        }
    }

    #[test]
    fn test_json() {
        let offset = Interval::default().with_high(Quantity::from_value(2).with_unit("d"));
        let rel = relationship(offset).unwrap();
        assert_eq!(
            serde_json::to_value(&rel).unwrap(),
            json!({
                "type": "SBS",
                "reference": "Encounter",
                "offset": {"type": "PQ", "unit": "d", "value": -2}
            })
        );

        let bare = TemporalRelationship::new(TemporalRelationshipType::During, None, None).unwrap();
        assert_eq!(serde_json::to_value(&bare).unwrap(), json!({"type": "DURING"}));
    }

    #[test]
    fn test_parse_defaults_offset_type() {
        let rel: TemporalRelationship = serde_json::from_value(json!({
            "type": "EAS",
            "reference": "Diagnosis",
            "offset": {"value": 30, "unit": "min"}
        }))
        .unwrap();

        assert_eq!(rel.relationship_type(), TemporalRelationshipType::Eas);
        assert_eq!(rel.reference().map(CriteriaReference::id), Some("Diagnosis"));
        assert_eq!(rel.offset().unwrap().quantity_type(), Some("PQ"));
        assert_eq!(rel.to_string(), "EAS Diagnosis (offset 30 min)");
    }

    #[test]
    fn test_falsy_reference_and_offset_are_unset() {
        let rel: TemporalRelationship = serde_json::from_value(json!({
            "type": "SBS",
            "reference": false,
            "offset": false
        }))
        .unwrap();

        assert_eq!(rel.reference(), None);
        assert_eq!(rel.offset(), None);
        assert_eq!(serde_json::to_value(&rel).unwrap(), json!({"type": "SBS"}));
    }
}
