//! Describe command implementation

use super::output::{self, OutputFormat};
use super::load_document;
use anyhow::Result;
use octofhir_hqmf_diagnostics::Result as HqmfResult;
use octofhir_hqmf_model::{CriteriaDocument, DataCriteria};
use serde::Serialize;
use std::path::PathBuf;
use tabled::{Table, Tabled, settings::Style};

/// Configuration for describe command
pub struct DescribeConfig {
    pub file: PathBuf,
    pub format: OutputFormat,
    pub output_file: Option<PathBuf>,
}

/// Human-readable summary of one data criterion
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct CriteriaSummary {
    #[tabled(rename = "Id")]
    pub id: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Effective time")]
    pub effective_time: String,
    #[tabled(rename = "Temporal references")]
    pub temporal_references: String,
    #[tabled(rename = "Subset operators")]
    pub subset_operators: String,
}

impl CriteriaSummary {
    pub fn from_criteria(criteria: &DataCriteria) -> Self {
        Self {
            id: criteria.id.clone(),
            value: criteria
                .value
                .as_ref()
                .map(|v| rendered(v.stringify()))
                .unwrap_or_default(),
            effective_time: criteria
                .effective_time
                .as_ref()
                .map(|t| rendered(t.stringify()))
                .unwrap_or_default(),
            temporal_references: joined(&criteria.temporal_references),
            subset_operators: joined(&criteria.subset_operators),
        }
    }
}

/// Summaries in document order
pub fn describe_document(document: &CriteriaDocument) -> Vec<CriteriaSummary> {
    document.iter().map(CriteriaSummary::from_criteria).collect()
}

/// Print one summary row per criterion
pub fn describe(config: DescribeConfig) -> Result<()> {
    let document = load_document(&config.file)?;
    let summaries = describe_document(&document);

    let content = match config.format {
        OutputFormat::Json => output::format_json(&summaries, false)?,
        OutputFormat::Pretty => output::format_json(&summaries, true)?,
        OutputFormat::Table if summaries.is_empty() => "(no data criteria)".to_string(),
        OutputFormat::Table => Table::new(&summaries).with(Style::modern()).to_string(),
    };

    output::write_output(&content, config.output_file.as_deref())
}

fn rendered(result: HqmfResult<String>) -> String {
    result.unwrap_or_else(|e| format!("[{}] {}", e.code(), e))
}

fn joined<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
