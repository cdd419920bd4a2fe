//! HQMF error types

use crate::{
    ErrorCode, HQMF0001, HQMF0002, HQMF0003, HQMF0004, HQMF0005, HQMF0100, HQMF0200, HQMF0201,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Error - the value or document cannot be used
    Error,
    /// Warning - the value is usable but something could not be rendered
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with its code and optional help
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context or help
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            help: None,
        }
    }

    /// Create a new warning diagnostic
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            help: None,
        }
    }

    /// Set help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Render with terminal colors (severity in red/yellow, code dimmed)
    #[cfg(feature = "colored")]
    pub fn render_colored(&self) -> String {
        use colored::Colorize;

        let severity = match self.severity {
            Severity::Error => self.severity.to_string().red().bold(),
            Severity::Warning => self.severity.to_string().yellow().bold(),
        };
        let mut out = format!("{}[{}]: {}", severity, self.code.to_string().dimmed(), self.message);
        if let Some(help) = &self.help {
            out.push_str(&format!("\n  {} {}", "help:".cyan(), help));
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.severity, self.code, self.message)?;
        if let Some(help) = &self.help {
            write!(f, " (help: {})", help)?;
        }
        Ok(())
    }
}

/// Main HQMF error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HqmfError {
    /// Polymorphic value carried a discriminator outside TS, IVL_PQ and CD
    #[error("Unknown value type [{type_tag}]")]
    UnknownValueType { type_tag: String },

    /// Temporal offset range carried both a low and a high bound
    #[error("cannot represent combined bound: offset range has both low and high")]
    CombinedOffsetBound,

    /// Offset bound to be negated has no numeric reading
    #[error("cannot negate non-numeric offset value '{value}'")]
    NonNumericOffset { value: String },

    /// Human-readable rendering failed
    #[error("cannot convert {what} to string")]
    Conversion { what: String },

    /// Temporal relationship code outside the known set
    #[error("Unknown temporal relationship type [{code}]")]
    UnknownTemporalType { code: String },

    /// Subset operator code outside the known set
    #[error("Unknown subset operator type [{code}]")]
    UnknownSubsetType { code: String },

    /// JSON parsing or serialization failed
    #[error("JSON error: {0}")]
    Json(String),

    /// Reading or writing a document failed
    #[error("IO error: {0}")]
    Io(String),
}

impl HqmfError {
    /// Create an unknown value type error
    pub fn unknown_value_type(type_tag: impl Into<String>) -> Self {
        Self::UnknownValueType {
            type_tag: type_tag.into(),
        }
    }

    /// Create a rendering error for the named kind of value
    pub fn conversion(what: impl Into<String>) -> Self {
        Self::Conversion { what: what.into() }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownValueType { .. } => HQMF0001,
            Self::CombinedOffsetBound => HQMF0002,
            Self::NonNumericOffset { .. } => HQMF0003,
            Self::UnknownTemporalType { .. } => HQMF0004,
            Self::UnknownSubsetType { .. } => HQMF0005,
            Self::Conversion { .. } => HQMF0100,
            Self::Json(_) => HQMF0200,
            Self::Io(_) => HQMF0201,
        }
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = match self {
            Self::Conversion { .. } => Diagnostic::warning(self.code(), self.to_string()),
            _ => Diagnostic::error(self.code(), self.to_string()),
        };
        match self.code().info().help {
            Some(help) => diag.with_help(help),
            None => diag,
        }
    }
}

impl From<serde_json::Error> for HqmfError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<std::io::Error> for HqmfError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
