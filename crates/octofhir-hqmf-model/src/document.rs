//! Criteria documents
//!
//! A document is the ordered collection of data criteria in a measure. On the
//! wire it is either a bare `{ "<id>": body, ... }` map or the same map
//! wrapped in a `{"data_criteria": ...}` envelope.

use indexmap::IndexMap;
use octofhir_hqmf_diagnostics::{HqmfError, Result};
use serde::de;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::DataCriteria;

const ENVELOPE_KEY: &str = "data_criteria";

/// Ordered id to criterion map
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CriteriaDocument {
    data_criteria: IndexMap<String, DataCriteria>,
}

impl CriteriaDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse either the envelope or a bare map
    ///
    /// An object whose only key is `data_criteria` is treated as the
    /// envelope.
    pub fn from_value(json: &Value) -> Result<Self> {
        let Value::Object(map) = json else {
            return Err(HqmfError::Json(
                "criteria document must be a JSON object".to_string(),
            ));
        };

        let entries = match map.get(ENVELOPE_KEY) {
            Some(Value::Object(inner)) if map.len() == 1 => inner,
            _ => map,
        };

        let mut document = Self::new();
        for (id, body) in entries {
            document.insert(DataCriteria::from_json(id.as_str(), body)?);
        }
        log::debug!("parsed criteria document with {} entries", document.len());
        Ok(document)
    }

    /// The envelope form: `{"data_criteria": { "<id>": body, ... }}`
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Add a criterion under its id, replacing any previous one
    pub fn insert(&mut self, criteria: DataCriteria) -> Option<DataCriteria> {
        self.data_criteria.insert(criteria.id.clone(), criteria)
    }

    pub fn get(&self, id: &str) -> Option<&DataCriteria> {
        self.data_criteria.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut DataCriteria> {
        self.data_criteria.get_mut(id)
    }

    /// Criteria in document order
    pub fn iter(&self) -> impl Iterator<Item = &DataCriteria> {
        self.data_criteria.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.data_criteria.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.data_criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_criteria.is_empty()
    }
}

impl FromIterator<DataCriteria> for CriteriaDocument {
    fn from_iter<I: IntoIterator<Item = DataCriteria>>(iter: I) -> Self {
        let mut document = Self::new();
        for criteria in iter {
            document.insert(criteria);
        }
        document
    }
}

impl<'a> IntoIterator for &'a CriteriaDocument {
    type Item = &'a DataCriteria;
    type IntoIter = indexmap::map::Values<'a, String, DataCriteria>;

    fn into_iter(self) -> Self::IntoIter {
        self.data_criteria.values()
    }
}

impl Serialize for CriteriaDocument {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut envelope = serializer.serialize_map(Some(1))?;
        envelope.serialize_entry(ENVELOPE_KEY, &self.data_criteria)?;
        envelope.end()
    }
}

impl<'de> Deserialize<'de> for CriteriaDocument {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let json = Value::deserialize(deserializer)?;
        Self::from_value(&json).map_err(de::Error::custom)
    }
}
