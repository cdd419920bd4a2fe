//! CLI command tests
//!
//! Commands write to a temporary output file so results can be read back.

use octofhir_hqmf::cli::check::{self, CheckConfig};
use octofhir_hqmf::cli::describe::{self, DescribeConfig};
use octofhir_hqmf::cli::normalize::{self, NormalizeConfig};
use octofhir_hqmf::cli::output::OutputFormat;
use octofhir_hqmf::CriteriaDocument;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/diabetes_a1c.json")
}

#[test]
fn test_normalize_writes_canonical_envelope() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("normalized.json");

    normalize::normalize(NormalizeConfig {
        file: fixture(),
        pretty: false,
        output_file: Some(out.clone()),
    })
    .unwrap();

    let written = fs::read_to_string(&out).unwrap();
    assert!(!written.contains('\n'));

    let normalized: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(normalized.as_object().unwrap().len(), 1);
    assert_eq!(normalized["data_criteria"].as_object().unwrap().len(), 5);

    let reparsed = CriteriaDocument::from_json(&written).unwrap();
    assert_eq!(reparsed.to_json().unwrap(), written);
}

#[test]
fn test_normalize_pretty() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("pretty.json");

    normalize::normalize(NormalizeConfig {
        file: fixture(),
        pretty: true,
        output_file: Some(out.clone()),
    })
    .unwrap();

    assert!(fs::read_to_string(&out).unwrap().contains("\n  \"data_criteria\""));
}

#[test]
fn test_normalize_missing_file() {
    let err = normalize::normalize(NormalizeConfig {
        file: PathBuf::from("does/not/exist.json"),
        pretty: false,
        output_file: None,
    })
    .unwrap_err();
    assert!(err.to_string().contains("Failed to read criteria file"));
}

#[test]
fn test_describe_as_json() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("describe.json");

    describe::describe(DescribeConfig {
        file: fixture(),
        format: OutputFormat::Json,
        output_file: Some(out.clone()),
    })
    .unwrap();

    let rows: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 5);
    assert_eq!(
        rows[0],
        json!({
            "id": "PatientCharacteristicBirthDate",
            "value": "",
            "effective_time": "",
            "temporal_references": "SBS MeasurePeriod (offset =-18 a)",
            "subset_operators": ""
        })
    );
    assert_eq!(rows[1]["value"], json!(">9 %"));
    assert_eq!(rows[4]["value"], json!("183932001"));
}

#[test]
fn test_describe_as_table() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("describe.txt");

    describe::describe(DescribeConfig {
        file: fixture(),
        format: OutputFormat::Table,
        output_file: Some(out.clone()),
    })
    .unwrap();

    let table = fs::read_to_string(&out).unwrap();
    assert!(table.contains("Temporal references"));
    assert!(table.contains("EncounterOutpatient"));
    assert!(table.contains("COUNT >=2"));
}

#[test]
fn test_check_reports_failures() {
    let dir = TempDir::new().unwrap();
    let broken = dir.path().join("broken.json");
    fs::write(&broken, r#"{"A": {"value": {"type": "ST"}}}"#).unwrap();

    let summary = check::check(CheckConfig {
        files: vec![fixture(), broken],
    })
    .unwrap();

    assert_eq!(summary.checked, 2);
    assert_eq!(summary.failed, 1);
    assert!(!summary.success());
}

#[test]
fn test_check_requires_files() {
    assert!(check::check(CheckConfig { files: vec![] }).is_err());
}
