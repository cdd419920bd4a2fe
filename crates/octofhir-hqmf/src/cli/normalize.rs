//! Normalize command implementation

use super::{load_document, output};
use anyhow::Result;
use octofhir_hqmf_model::{CriteriaSerializer, JsonSerializer};
use std::path::PathBuf;

/// Configuration for normalize command
pub struct NormalizeConfig {
    pub file: PathBuf,
    pub pretty: bool,
    pub output_file: Option<PathBuf>,
}

/// Parse a criteria document and write it back in canonical form
pub fn normalize(config: NormalizeConfig) -> Result<()> {
    let document = load_document(&config.file)?;

    let serializer = JsonSerializer {
        pretty: config.pretty,
    };
    let content = serializer
        .serialize(&document)
        .map_err(|e| anyhow::anyhow!("JSON serialization failed: {}", e))?;

    output::write_output(&content, config.output_file.as_deref())
}
