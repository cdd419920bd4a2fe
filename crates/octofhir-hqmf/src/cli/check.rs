//! Check command implementation

use super::output;
use anyhow::Result;
use colored::Colorize;
use octofhir_hqmf_diagnostics::{Diagnostic, HqmfError, Severity};
use octofhir_hqmf_model::CriteriaDocument;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for check command
pub struct CheckConfig {
    pub files: Vec<PathBuf>,
}

/// Outcome of checking a single file
pub struct FileReport {
    pub file: PathBuf,
    pub criteria: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    pub fn success(&self) -> bool {
        self.diagnostics
            .iter()
            .all(|d| d.severity != Severity::Error)
    }
}

/// Totals across all checked files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckSummary {
    pub checked: usize,
    pub failed: usize,
    pub warnings: usize,
}

impl CheckSummary {
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

/// Parse every file, printing one result per file
pub fn check(config: CheckConfig) -> Result<CheckSummary> {
    if config.files.is_empty() {
        anyhow::bail!("No files specified for checking");
    }

    let mut summary = CheckSummary::default();
    for file in &config.files {
        let report = check_file(file);
        print_report(&report);

        summary.checked += 1;
        if !report.success() {
            summary.failed += 1;
        }
        summary.warnings += report
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count();
    }

    println!();
    if summary.success() {
        println!(
            "{}",
            output::format_success(&format!(
                "All {} file(s) checked successfully",
                summary.checked
            ))
        );
    } else {
        eprintln!(
            "{} {} of {} file(s)",
            "Check failed:".red().bold(),
            summary.failed,
            summary.checked
        );
    }

    Ok(summary)
}

/// Check a single file without printing
pub fn check_file(file: &Path) -> FileReport {
    log::debug!("checking {}", file.display());

    let mut report = FileReport {
        file: file.to_path_buf(),
        criteria: 0,
        diagnostics: Vec::new(),
    };

    match load(file) {
        Ok(document) => {
            report.criteria = document.len();
            report.diagnostics.extend(render_warnings(&document));
        }
        Err(e) => report.diagnostics.push(e.to_diagnostic()),
    }
    report
}

fn load(file: &Path) -> std::result::Result<CriteriaDocument, HqmfError> {
    let content = fs::read_to_string(file)?;
    CriteriaDocument::from_json(&content)
}

/// Values and effective times that parse but cannot be rendered
fn render_warnings(document: &CriteriaDocument) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for criteria in document {
        let value = criteria.value.as_ref().map(|v| v.stringify());
        let time = criteria.effective_time.as_ref().map(|t| t.stringify());

        for result in [value, time].into_iter().flatten() {
            if let Err(e) = result {
                let diagnostic = e.to_diagnostic();
                diagnostics.push(Diagnostic {
                    message: format!("{}: {}", criteria.id, diagnostic.message),
                    ..diagnostic
                });
            }
        }
    }
    diagnostics
}

fn print_report(report: &FileReport) {
    let status = if report.success() {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };

    if report.success() {
        println!(
            "{} {} ({} data criteria)",
            status,
            report.file.display(),
            report.criteria
        );
    } else {
        println!("{} {}", status, report.file.display());
    }

    for diagnostic in &report.diagnostics {
        println!("  {}", diagnostic.render_colored());
    }
    if report.success() && report.criteria == 0 {
        println!("  {}", output::format_warning("document contains no data criteria"));
    }
}
