//! Error types for the colsplit pipeline.
//!
//! - [`CsvError`] - CSV parsing errors
//! - [`ConfigError`] - Environment configuration errors
//! - [`PipelineError`] - Parse → pivot → format orchestration errors
//! - [`ServerError`] - HTTP server errors
//!
//! Conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// CSV Parsing Errors
// =============================================================================

/// Errors during CSV decoding and parsing.
///
/// Line numbers are 1-based and count physical lines of the input,
/// header included.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The delimiter cannot be used by the CSV reader.
    #[error("Unsupported delimiter '{0}': must be a single ASCII character")]
    Delimiter(char),

    /// Empty file: there is no header row at all.
    #[error("CSV file is empty")]
    EmptyFile,

    /// The same column name appears twice in the header row.
    #[error("Duplicate column '{0}' in header row")]
    DuplicateHeader(String),

    /// A data row does not have as many fields as the header.
    #[error("Line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Any other malformed input reported by the CSV reader.
    #[error("Line {line}: {message}")]
    Malformed { line: u64, message: String },
}

impl CsvError {
    /// Line the error points at, when it points at one.
    pub fn line(&self) -> Option<u64> {
        match self {
            CsvError::FieldCount { line, .. } | CsvError::Malformed { line, .. } => Some(*line),
            CsvError::EmptyFile | CsvError::DuplicateHeader(_) => Some(1),
            _ => None,
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set but its value does not parse.
    #[error("Invalid value '{value}' for {key}: {message}")]
    Invalid {
        key: String,
        value: String,
        message: String,
    },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the error type returned by [`crate::transform::pipeline::pivot_csv`] and
/// [`crate::transform::pipeline::pivot_bytes`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// JSON rendering error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Output could not be written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A requested column is not in the header row.
    #[error("Unknown column '{column}' (available: {available})")]
    UnknownColumn { column: String, available: String },
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Server internal error.
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Listener could not be bound or served.
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
