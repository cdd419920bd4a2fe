//! CLI functionality for the HQMF tool
//!
//! This module contains all CLI-related functionality including:
//! - Document normalization
//! - Criteria description
//! - Document checking
//! - Output formatting

pub mod check;
pub mod describe;
pub mod normalize;
pub mod output;

use anyhow::{Context, Result};
use octofhir_hqmf_model::CriteriaDocument;
use std::fs;
use std::path::Path;

/// Read and parse a criteria document from disk
pub fn load_document(file: &Path) -> Result<CriteriaDocument> {
    log::debug!("loading criteria document {}", file.display());

    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read criteria file: {}", file.display()))?;
    CriteriaDocument::from_json(&content)
        .with_context(|| format!("Failed to parse criteria file: {}", file.display()))
}
