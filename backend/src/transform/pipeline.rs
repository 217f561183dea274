//! High-level pipeline: parse → pivot → format.
//!
//! # Example
//!
//! ```rust,ignore
//! use colsplit::{pivot_csv, PivotOptions};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let result = pivot_csv(Path::new("translations.csv"), &PivotOptions::default(), None)?;
//!
//!     for column in &result.fragments {
//!         println!("// {}\n{}", column.column, column.fragment);
//!     }
//!     Ok(())
//! }
//! ```

use serde::Serialize;
use std::path::Path;

use crate::api::logs::{log_error, log_info, log_info_indent, log_success, log_warning};
use crate::error::{CsvError, PipelineError};
use crate::models::{PivotOptions, PivotResult};
use crate::parser::{parse_bytes_with, ParseResult};

use super::format::format_fragment;
use super::pivot::pivot_columns;

/// CSV file information
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvInfo {
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
    pub key_column: String,
    pub key_column_present: bool,
}

/// One rendered column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnFragment {
    /// Column name
    pub column: String,
    /// Paste-ready fragment (see [`format_fragment`])
    pub fragment: String,
    /// Number of key/value pairs in the fragment
    pub entries: usize,
    /// Records left out because the key or the value was empty
    pub skipped: usize,
}

/// Result of a complete pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineResult {
    /// CSV parsing metadata
    pub csv_info: CsvInfo,
    /// Column mappings, in header order
    pub pivots: PivotResult,
    /// Rendered fragments, one per entry of `pivots`
    pub fragments: Vec<ColumnFragment>,
}

impl PipelineResult {
    /// Fragments for the requested columns, in request order.
    ///
    /// An empty request selects every column.
    pub fn select(&self, columns: &[String]) -> Result<Vec<&ColumnFragment>, PipelineError> {
        if columns.is_empty() {
            return Ok(self.fragments.iter().collect());
        }

        columns
            .iter()
            .map(|name| {
                self.fragments
                    .iter()
                    .find(|f| &f.column == name)
                    .ok_or_else(|| PipelineError::UnknownColumn {
                        column: name.clone(),
                        available: self.pivots.column_names().collect::<Vec<_>>().join(", "),
                    })
            })
            .collect()
    }
}

/// Split a CSV file into per-column fragments.
///
/// The encoding is always detected; the delimiter is detected unless given.
pub fn pivot_csv(
    path: &Path,
    options: &PivotOptions,
    delimiter: Option<char>,
) -> Result<PipelineResult, PipelineError> {
    log_info(format!("📖 Reading {}", path.display()));
    let bytes = std::fs::read(path).map_err(CsvError::from)?;
    pivot_bytes(&bytes, options, delimiter)
}

/// Same as [`pivot_csv`] but for raw bytes.
pub fn pivot_bytes(
    bytes: &[u8],
    options: &PivotOptions,
    delimiter: Option<char>,
) -> Result<PipelineResult, PipelineError> {
    log_info("Detecting encoding and separator...");

    let parsed = parse_bytes_with(bytes, delimiter).map_err(|e| {
        log_error(format!("Failed to parse CSV: {e}"));
        e
    })?;

    pivot_parsed(parsed, options)
}

/// Pivot and render already-parsed CSV data.
pub fn pivot_parsed(
    parsed: ParseResult,
    options: &PivotOptions,
) -> Result<PipelineResult, PipelineError> {
    log_success(format!("Encoding: {}", parsed.encoding));
    log_success(format!("Separator: '{}'", format_delimiter(parsed.delimiter)));
    log_success(format!("Read {} rows", parsed.records.len()));

    log_info(format!("📋 CSV has {} columns:", parsed.headers.len()));
    for (i, col) in parsed.headers.iter().enumerate() {
        log_info_indent(format!("[{:2}] {}", i + 1, col), 1);
    }

    let key_column_present = parsed.headers.iter().any(|h| *h == options.key_column);
    if !key_column_present {
        log_warning(format!(
            "Key column '{}' not found; every mapping will be empty",
            options.key_column
        ));
    }

    log_info(format!("🔄 Pivoting on '{}'...", options.key_column));
    let pivots = pivot_columns(&parsed.records, &parsed.headers, options);

    let fragments = pivots
        .columns()
        .iter()
        .map(|pivot| {
            let fragment = ColumnFragment {
                column: pivot.column().to_string(),
                fragment: format_fragment(pivot)?,
                entries: pivot.len(),
                skipped: pivot.skipped(),
            };
            log_info_indent(
                format!(
                    "{}: {} entries, {} skipped",
                    fragment.column, fragment.entries, fragment.skipped
                ),
                1,
            );
            Ok::<_, serde_json::Error>(fragment)
        })
        .collect::<Result<Vec<_>, _>>()?;

    log_success(format!("{} columns ready", fragments.len()));

    Ok(PipelineResult {
        csv_info: CsvInfo {
            encoding: parsed.encoding,
            delimiter: parsed.delimiter,
            headers: parsed.headers,
            row_count: parsed.records.len(),
            key_column: options.key_column.clone(),
            key_column_present,
        },
        pivots,
        fragments,
    })
}

/// Format delimiter for display
pub fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "TAB".to_string(),
        c => c.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = "RU,EN,DE\nпривет,hello,hallo\nмир,world,\n";

    #[test]
    fn test_scenario_fragments() {
        let result = pivot_bytes(SCENARIO.as_bytes(), &PivotOptions::default(), None).unwrap();

        assert_eq!(result.csv_info.row_count, 2);
        assert_eq!(result.csv_info.delimiter, ',');
        assert!(result.csv_info.key_column_present);

        let columns: Vec<_> = result.fragments.iter().map(|f| f.column.as_str()).collect();
        assert_eq!(columns, vec!["RU", "EN", "DE"]);

        let en = &result.fragments[1];
        assert_eq!(en.fragment, ",\n  \"привет\": \"hello\",\n  \"мир\": \"world\"\n");
        assert_eq!(en.entries, 2);

        let de = &result.fragments[2];
        assert_eq!(de.fragment, ",\n  \"привет\": \"hallo\"\n");
        assert_eq!(de.skipped, 1);
    }

    #[test]
    fn test_missing_key_column_is_not_an_error() {
        let result = pivot_bytes(b"EN,DE\nhello,hallo\n", &PivotOptions::default(), None).unwrap();

        assert!(!result.csv_info.key_column_present);
        assert!(result.fragments.iter().all(|f| f.entries == 0 && f.fragment == ","));
    }

    #[test]
    fn test_parse_failure_propagates() {
        let err = pivot_bytes(b"", &PivotOptions::default(), None).unwrap_err();
        assert!(matches!(err, PipelineError::Csv(CsvError::EmptyFile)));
    }

    #[test]
    fn test_select_columns() {
        let result = pivot_bytes(SCENARIO.as_bytes(), &PivotOptions::default(), None).unwrap();

        let picked = result.select(&["DE".to_string(), "EN".to_string()]).unwrap();
        assert_eq!(picked[0].column, "DE");
        assert_eq!(picked[1].column, "EN");

        assert_eq!(result.select(&[]).unwrap().len(), 3);
    }

    #[test]
    fn test_select_unknown_column() {
        let result = pivot_bytes(SCENARIO.as_bytes(), &PivotOptions::default(), None).unwrap();

        let err = result.select(&["FR".to_string()]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("FR"));
        assert!(msg.contains("RU, EN, DE"));
    }

    #[test]
    fn test_format_delimiter() {
        assert_eq!(format_delimiter('\t'), "TAB");
        assert_eq!(format_delimiter(';'), ";");
    }
}
