//! Error types for GOCAD mesh analysis
//!
//! Errors in this module are the *fatal* kind: a file that cannot be read, a
//! keyword configuration that is unusable, an identifier table that cannot be
//! loaded. Defects found inside a mesh file are never errors in this sense;
//! they are reported as [`ValidationFinding`](crate::model::ValidationFinding)s.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O errors
//! - **E2xxx**: Configuration errors
//! - **E3xxx**: Data errors
//!
//! ## Common Error Codes
//!
//! - `E1001`: I/O error reading a file
//! - `E1002`: Mesh file not found
//! - `E2001`: Invalid keyword configuration
//! - `E2002`: Malformed configuration document
//! - `E2003`: Invalid naming pattern
//! - `E3001`: Numeric parse error
//! - `E3002`: Identifier table error
//! - `E3003`: CSV format error

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh analysis operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while analysing GOCAD files
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while reading a file
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - Insufficient permissions
    /// - File is not valid UTF-8
    /// - Disk read error
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// The mesh file does not exist
    ///
    /// **Error Code**: E1002
    ///
    /// Raised before any parsing begins. It is fatal for the affected file
    /// only; batch analysis records it and moves on.
    #[error("[E1002] Mesh file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Keyword configuration failed validation
    ///
    /// **Error Code**: E2001
    ///
    /// **Common Causes**:
    /// - Empty keyword vocabulary
    /// - Blank keyword or special prefix
    /// - Boolean rule without accepted values
    #[error("[E2001] Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration document could not be deserialized
    ///
    /// **Error Code**: E2002
    #[error("[E2002] Malformed configuration: {0}")]
    ConfigFormat(#[from] serde_json::Error),

    /// Naming pattern could not be compiled
    ///
    /// **Error Code**: E2003
    #[error("[E2003] Invalid naming pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Parse error for numeric values
    ///
    /// **Error Code**: E3001
    ///
    /// Inside the mesh parser this error is demoted to a header warning and the
    /// offending record is dropped.
    ///
    /// **Suggestions**:
    /// - Verify numeric values use proper format (e.g., "1.5" not "1,5")
    #[error("[E3001] Parse error: {0}")]
    ParseError(String),

    /// Identifier table could not be used
    ///
    /// **Error Code**: E3002
    #[error("[E3002] Identifier table error: {0}")]
    IdentifierTable(String),

    /// CSV reader error while loading an identifier table
    ///
    /// **Error Code**: E3003
    #[error("[E3003] CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Create a ParseError with context about what was being parsed
    ///
    /// # Arguments
    /// * `field_name` - The name of the field being parsed (e.g., "vertex x coordinate")
    /// * `value` - The value that failed to parse
    /// * `expected_type` - The expected type (e.g., "floating-point number")
    pub fn parse_error_with_context(field_name: &str, value: &str, expected_type: &str) -> Self {
        Error::ParseError(format!(
            "Failed to parse '{}': expected {}, got '{}'",
            field_name, expected_type, value
        ))
    }

    /// Create an InvalidConfig error naming the offending setting
    pub fn invalid_config(setting: &str, message: &str) -> Self {
        Error::InvalidConfig(format!("{}: {}", setting, message))
    }
}
