//! Data-criteria records
//!
//! A data criterion names a class of clinical events (an encounter, a lab
//! result, a diagnosis) and constrains them by value, time and relationship
//! to other criteria.

use indexmap::IndexMap;
use octofhir_hqmf_diagnostics::{HqmfError, Result};
use octofhir_hqmf_types::serde_helpers::{falsy_as_default, falsy_as_false, falsy_as_none, is_false};
use octofhir_hqmf_types::{CriteriaValue, EffectiveTime, SubsetSelector, TemporalRelationship};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Derivation operator combining children as a cross product
pub const XPRODUCT: &str = "XPRODUCT";

/// Derivation operator combining children as a union
pub const UNION: &str = "UNION";

/// A single data criterion
///
/// The `id` is the key under which the criterion is stored; it is never part
/// of the JSON body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataCriteria {
    /// Identifier (the document key)
    #[serde(skip)]
    pub id: String,
    #[serde(default, deserialize_with = "falsy_as_none", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "falsy_as_none", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// QDS category (e.g. "encounter")
    #[serde(default, deserialize_with = "falsy_as_none", skip_serializing_if = "Option::is_none")]
    pub standard_category: Option<String>,
    /// QDS data type (e.g. "encounter_performed")
    #[serde(default, deserialize_with = "falsy_as_none", skip_serializing_if = "Option::is_none")]
    pub qds_data_type: Option<String>,
    /// Value set OID
    #[serde(default, deserialize_with = "falsy_as_none", skip_serializing_if = "Option::is_none")]
    pub code_list_id: Option<String>,
    /// Ids of child criteria for derived criteria
    #[serde(
        default,
        deserialize_with = "falsy_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children_criteria: Vec<String>,
    /// `XPRODUCT` or `UNION`
    #[serde(default, deserialize_with = "falsy_as_none", skip_serializing_if = "Option::is_none")]
    pub derivation_operator: Option<String>,
    #[serde(default, deserialize_with = "falsy_as_none", skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "falsy_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub criteria_type: Option<String>,
    #[serde(default, deserialize_with = "falsy_as_none", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "falsy_as_false",
        skip_serializing_if = "is_false"
    )]
    pub negation: bool,
    #[serde(default, deserialize_with = "falsy_as_none", skip_serializing_if = "Option::is_none")]
    pub value: Option<CriteriaValue>,
    #[serde(default, deserialize_with = "falsy_as_none", skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<EffectiveTime>,
    /// Code system to codes
    #[serde(default, deserialize_with = "falsy_as_none", skip_serializing_if = "Option::is_none")]
    pub inline_code_list: Option<IndexMap<String, Vec<String>>>,
    #[serde(
        default,
        deserialize_with = "falsy_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub temporal_references: Vec<TemporalRelationship>,
    #[serde(
        default,
        deserialize_with = "falsy_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub subset_operators: Vec<SubsetSelector>,
}

impl DataCriteria {
    /// Create an empty criterion with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Parse a criterion body
    ///
    /// A malformed `value` surfaces as its own error (e.g. an unknown value
    /// type) rather than a generic JSON error.
    pub fn from_json(id: impl Into<String>, json: &Value) -> Result<Self> {
        let id = id.into();
        log::trace!("parsing data criteria [{}]", id);

        let mut criteria = Self::deserialize(json).map_err(|err| {
            json.get("value")
                .and_then(|value| CriteriaValue::from_optional_json(value).err())
                .unwrap_or_else(|| HqmfError::from(err))
        })?;
        criteria.id = id;
        Ok(criteria)
    }

    /// The body keyed by id: `{ "<id>": body }`
    pub fn to_json(&self) -> Result<Value> {
        let mut keyed = Map::new();
        keyed.insert(self.id.clone(), self.base_json()?);
        Ok(Value::Object(keyed))
    }

    /// The body alone, without the id
    pub fn base_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Whether this criterion is derived from children
    pub fn is_derived(&self) -> bool {
        self.derivation_operator.is_some() || !self.children_criteria.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octofhir_hqmf_types::{SubsetOperatorType, TemporalRelationshipType};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_from_json_sets_id() {
        let criteria = DataCriteria::from_json(
            "EncounterInpatient",
            &json!({
                "title": "Encounter, Performed: Inpatient",
                "standard_category": "encounter",
                "qds_data_type": "encounter_performed",
                "code_list_id": "2.16.840.1.113883.3.666.5.307",
                "type": "encounters"
            }),
        )
        .unwrap();

        assert_eq!(criteria.id, "EncounterInpatient");
        assert_eq!(criteria.criteria_type.as_deref(), Some("encounters"));
        assert!(!criteria.negation);
        assert!(criteria.value.is_none());
    }

    #[test]
    fn test_nested_types_are_normalized() {
        let criteria = DataCriteria::from_json(
            "LabResult",
            &json!({
                "temporal_references": [
                    {
                        "type": "SBS",
                        "reference": "MeasurePeriod",
                        "offset": {"value": 30, "unit": "d"}
                    }
                ],
                "subset_operators": [
                    {"type": "FIRST", "value": {"low": {"value": 1, "inclusive?": true}}}
                ]
            }),
        )
        .unwrap();

        let relationship = &criteria.temporal_references[0];
        assert_eq!(relationship.relationship_type(), TemporalRelationshipType::Sbs);
        assert_eq!(relationship.offset().unwrap().quantity_type(), Some("PQ"));

        let subset = &criteria.subset_operators[0];
        assert_eq!(subset.operator_type(), SubsetOperatorType::First);
        assert_eq!(subset.value().unwrap().interval_type(), Some("IVL_PQ"));
    }

    #[test]
    fn test_unknown_value_type_is_reported() {
        let err = DataCriteria::from_json("x", &json!({"value": {"type": "ST", "value": "a"}}))
            .unwrap_err();
        assert_eq!(err, HqmfError::unknown_value_type("ST"));
    }

    #[test]
    fn test_to_json_is_keyed_by_id() {
        let mut criteria = DataCriteria::new("Diagnosis");
        criteria.title = Some("Diagnosis, Active".to_string());
        criteria.negation = true;

        assert_eq!(
            criteria.to_json().unwrap(),
            json!({"Diagnosis": {"title": "Diagnosis, Active", "negation": true}})
        );
    }

    #[test]
    fn test_empty_collections_are_omitted() {
        let criteria = DataCriteria::from_json(
            "Union",
            &json!({
                "children_criteria": [],
                "temporal_references": null,
                "negation": false,
                "derivation_operator": UNION
            }),
        )
        .unwrap();

        assert!(criteria.is_derived());
        assert_eq!(criteria.base_json().unwrap(), json!({"derivation_operator": "UNION"}));
    }

    #[test]
    fn test_inline_code_list_keeps_order() {
        let criteria = DataCriteria::from_json(
            "Codes",
            &json!({"inline_code_list": {"SNOMED-CT": ["1", "2"], "ICD-9-CM": ["250.00"]}}),
        )
        .unwrap();

        let systems: Vec<&str> = criteria
            .inline_code_list
            .as_ref()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(systems, vec!["SNOMED-CT", "ICD-9-CM"]);
    }

    #[rstest]
    #[case::value(json!({"value": false}))]
    #[case::effective_time(json!({"effective_time": false}))]
    #[case::both(json!({"value": false, "effective_time": false}))]
    #[case::strings(json!({"title": false, "code_list_id": false, "type": false}))]
    #[case::collections(json!({"children_criteria": false, "inline_code_list": false}))]
    #[case::references(json!({"temporal_references": false, "subset_operators": null}))]
    fn test_falsy_fields_are_unset(#[case] body: Value) {
        let criteria = DataCriteria::from_json("A", &body).unwrap();

        assert_eq!(criteria, DataCriteria::new("A"));
        assert_eq!(criteria.base_json().unwrap(), json!({}));
    }

    #[rstest]
    #[case::unknown_type(json!({"value": {"type": "ST"}}), HqmfError::unknown_value_type("ST"))]
    #[case::missing_type(json!({"value": {"value": 1}}), HqmfError::unknown_value_type(""))]
    fn test_value_errors_stay_typed(#[case] body: Value, #[case] expected: HqmfError) {
        assert_eq!(DataCriteria::from_json("A", &body).unwrap_err(), expected);
    }
}
