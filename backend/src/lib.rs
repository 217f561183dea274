//! # colsplit - split a translations CSV into per-column JSON fragments
//!
//! Every column of the CSV becomes a mapping from the key column's value
//! (`RU` by default) to that column's value on the same row. Each mapping is
//! rendered as a paste-ready fragment: pretty JSON with the outer braces
//! removed and a leading comma, ready to be appended to an existing object.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│    Pivot    │────▶│  Fragments  │
//! │  (ISO/UTF8) │     │  (auto-enc) │     │ (key → val) │     │ (per column)│
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use colsplit::{pivot_csv, PivotOptions};
//! use std::path::Path;
//!
//! let result = pivot_csv(Path::new("input.csv"), &PivotOptions::default(), None)?;
//! println!("Pivoted {} columns", result.fragments.len());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (Record, ColumnPivot, PivotResult)
//! - [`parser`] - CSV parsing with auto-detection
//! - [`transform`] - Pivot, fragment formatting and pipeline
//! - [`config`] - Environment configuration
//! - [`logging`] - `tracing` subscriber setup
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;
pub mod logging;
pub mod models;

// Parsing
pub mod parser;

// Pivot and formatting
pub mod transform;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ConfigError, CsvError, CsvResult, PipelineError, ServerError, ServerResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{ColumnPivot, PivotOptions, PivotResult, Record, DEFAULT_KEY_COLUMN};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content, detect_delimiter, detect_encoding, parse_bytes_auto, parse_bytes_with,
    parse_csv_file_auto, parse_delimiter, parse_str, ParseResult,
};

// =============================================================================
// Re-exports - Pivot & Format
// =============================================================================

pub use transform::{
    format_document, format_fragment, pivot_column, pivot_columns, strip_outer_braces,
    to_pretty_json,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    pivot_bytes, pivot_csv, pivot_parsed, ColumnFragment, CsvInfo, PipelineResult,
};

// =============================================================================
// Re-exports - Config & API
// =============================================================================

pub use config::AppConfig;
pub use api::types::{error_response, ColumnPanel, PivotResponse, ResponseMetadata};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}
