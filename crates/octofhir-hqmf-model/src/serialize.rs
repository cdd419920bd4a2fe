//! Criteria document serialization

use std::io::{Read, Write};

use octofhir_hqmf_diagnostics::Result;

use crate::CriteriaDocument;

/// Trait for criteria document serializers
pub trait CriteriaSerializer {
    /// Serialize a document to a string
    fn serialize(&self, document: &CriteriaDocument) -> Result<String>;

    /// Serialize a document to a writer
    fn serialize_to_writer<W: Write>(&self, document: &CriteriaDocument, writer: W) -> Result<()>;

    /// Deserialize a document from a string
    fn deserialize(&self, input: &str) -> Result<CriteriaDocument>;

    /// Deserialize a document from a reader
    fn deserialize_from_reader<R: Read>(&self, reader: R) -> Result<CriteriaDocument>;
}

/// JSON serializer for criteria documents
///
/// Always writes the `{"data_criteria": ...}` envelope; reads either form.
#[derive(Debug, Default, Clone)]
pub struct JsonSerializer {
    /// Whether to produce pretty-printed output
    pub pretty: bool,
}

impl JsonSerializer {
    /// Create a new JSON serializer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new JSON serializer with pretty-printing enabled
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl CriteriaSerializer for JsonSerializer {
    fn serialize(&self, document: &CriteriaDocument) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(document)?
        } else {
            serde_json::to_string(document)?
        };
        Ok(json)
    }

    fn serialize_to_writer<W: Write>(
        &self,
        document: &CriteriaDocument,
        mut writer: W,
    ) -> Result<()> {
        let json = self.serialize(document)?;
        writer.write_all(json.as_bytes())?;
        Ok(())
    }

    fn deserialize(&self, input: &str) -> Result<CriteriaDocument> {
        let json: serde_json::Value = serde_json::from_str(input)?;
        CriteriaDocument::from_value(&json)
    }

    fn deserialize_from_reader<R: Read>(&self, mut reader: R) -> Result<CriteriaDocument> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        self.deserialize(&content)
    }
}

/// Convenience functions for quick serialization
impl CriteriaDocument {
    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String> {
        JsonSerializer::new().serialize(self)
    }

    /// Serialize to pretty-printed JSON string
    pub fn to_json_pretty(&self) -> Result<String> {
        JsonSerializer::pretty().serialize(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        JsonSerializer::new().deserialize(json)
    }
}
