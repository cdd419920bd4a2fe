//! References between data criteria

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pointer to another data criterion by its identifier
///
/// Serializes to the bare id string, not to an object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriteriaReference {
    id: String,
}

impl CriteriaReference {
    /// Create a new reference
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }
}

impl fmt::Display for CriteriaReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_as_scalar() {
        let reference = CriteriaReference::new("EncounterInpatient");
        assert_eq!(
            serde_json::to_value(&reference).unwrap(),
            json!("EncounterInpatient")
        );

        let parsed: CriteriaReference =
            serde_json::from_value(json!("EncounterInpatient")).unwrap();
        assert_eq!(parsed, reference);
    }

    #[test]
    fn test_set_id() {
        let mut reference = CriteriaReference::new("a");
        reference.set_id("b");
        assert_eq!(reference.id(), "b");
    }
}
