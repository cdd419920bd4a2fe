//! Serde field helpers for the "absent or falsy means unset" parsing rule

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a flag where `false`, `null` and absence all mean unset
pub fn falsy_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Deserialize an optional field where `false` and `null` mean unset
pub fn falsy_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => Ok(None),
        value => T::deserialize(value).map(Some).map_err(de::Error::custom),
    }
}

/// Deserialize a collection where `false` and `null` mean empty
pub fn falsy_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    Ok(falsy_as_none(deserializer)?.unwrap_or_default())
}

/// Whether a JSON value counts as unset
pub fn is_falsy(value: &Value) -> bool {
    matches!(value, Value::Null | Value::Bool(false))
}

/// Skip predicate for flags that are only emitted when set
pub fn is_false(flag: &bool) -> bool {
    !*flag
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "falsy_as_none")]
        name: Option<String>,
        #[serde(default, deserialize_with = "falsy_as_default")]
        items: Vec<u32>,
    }

    #[test]
    fn test_falsy_values_are_unset() {
        let inputs = [
            json!({}),
            json!({"name": null, "items": null}),
            json!({"name": false, "items": false}),
        ];
        for input in inputs {
            let fields: Fields = serde_json::from_value(input).unwrap();
            assert_eq!(fields.name, None);
            assert!(fields.items.is_empty());
        }
    }

    #[test]
    fn test_truthy_values_are_kept() {
        let fields: Fields = serde_json::from_value(json!({"name": "", "items": [1, 2]})).unwrap();
        assert_eq!(fields.name.as_deref(), Some(""));
        assert_eq!(fields.items, vec![1, 2]);
    }

    #[test]
    fn test_wrong_type_still_fails() {
        let err = serde_json::from_value::<Fields>(json!({"name": 3})).unwrap_err();
        assert!(err.to_string().contains("expected a string"));
    }
}
