//! HQMF error codes following a structured numbering system
//!
//! Error code ranges:
//! - HQMF0001-HQMF0099: Value errors (parsing and normalization of typed values)
//! - HQMF0100-HQMF0199: Rendering errors (human-readable stringification)
//! - HQMF0200-HQMF0299: Document errors (JSON, I/O)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a value error (0001-0099)
    pub const fn is_value_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    /// Check if this is a rendering error (0100-0199)
    pub const fn is_render_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is a document error (0200-0299)
    pub const fn is_document_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HQMF{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Value errors (0001-0099)
    map.insert(1, ErrorInfo::new("Unknown value type")
        .with_help("Criterion values must be typed TS, IVL_PQ or CD"));
    map.insert(2, ErrorInfo::new("Offset range has both bounds")
        .with_help("Express a temporal offset with either a low or a high bound, not both"));
    map.insert(3, ErrorInfo::new("Offset value is not numeric"));
    map.insert(4, ErrorInfo::new("Unknown temporal relationship type"));
    map.insert(5, ErrorInfo::new("Unknown subset operator type"));

    // Rendering errors (0100-0199)
    map.insert(100, ErrorInfo::new("Value cannot be rendered")
        .with_help("A range needs a low or a high bound to be rendered"));

    // Document errors (0200-0299)
    map.insert(200, ErrorInfo::new("Malformed JSON"));
    map.insert(201, ErrorInfo::new("I/O error"));

    map
});

// Value errors
pub const HQMF0001: ErrorCode = ErrorCode::new(1);
pub const HQMF0002: ErrorCode = ErrorCode::new(2);
pub const HQMF0003: ErrorCode = ErrorCode::new(3);
pub const HQMF0004: ErrorCode = ErrorCode::new(4);
pub const HQMF0005: ErrorCode = ErrorCode::new(5);

// Rendering errors
pub const HQMF0100: ErrorCode = ErrorCode::new(100);

// Document errors
pub const HQMF0200: ErrorCode = ErrorCode::new(200);
pub const HQMF0201: ErrorCode = ErrorCode::new(201);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(HQMF0001.to_string(), "HQMF0001");
        assert_eq!(HQMF0100.to_string(), "HQMF0100");
    }

    #[test]
    fn test_error_categories() {
        assert!(HQMF0002.is_value_error());
        assert!(!HQMF0002.is_render_error());

        assert!(HQMF0100.is_render_error());
        assert!(HQMF0201.is_document_error());
    }

    #[test]
    fn test_error_info() {
        assert_eq!(HQMF0001.info().description, "Unknown value type");
        assert!(HQMF0100.info().help.is_some());
        assert_eq!(ErrorCode::new(999).info().description, "Unknown error");
    }
}
