//! REST API types for frontend integration.
//!
//! Column fragments are returned ready to display and copy; the frontend
//! does no JSON rendering of its own.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::transform::pipeline::{format_delimiter, PipelineResult};

/// Response sent to the frontend after a CSV upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotResponse {
    /// Unique job identifier
    pub job_id: String,

    /// Status: "ready", "warning" (key column absent), "error"
    pub status: String,

    /// Uploaded file name, when the upload carried one
    pub file_name: Option<String>,

    /// One panel per column, in header order
    pub columns: Vec<ColumnPanel>,

    /// Metadata about the parse
    pub metadata: ResponseMetadata,
}

/// A single column, rendered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnPanel {
    pub name: String,
    pub fragment: String,
    pub entries: usize,
    pub skipped: usize,
}

/// Metadata about the parsed file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub encoding: String,
    pub delimiter: String,
    pub row_count: usize,
    pub headers: Vec<String>,
    pub key_column: String,
    pub key_column_present: bool,
    /// RFC 3339 UTC timestamp
    pub generated_at: String,
}

impl PivotResponse {
    pub fn from_result(result: PipelineResult, file_name: Option<String>) -> Self {
        let info = result.csv_info;

        PivotResponse {
            job_id: Uuid::new_v4().to_string(),
            status: if info.key_column_present { "ready" } else { "warning" }.to_string(),
            file_name,
            columns: result
                .fragments
                .into_iter()
                .map(|f| ColumnPanel {
                    name: f.column,
                    fragment: f.fragment,
                    entries: f.entries,
                    skipped: f.skipped,
                })
                .collect(),
            metadata: ResponseMetadata {
                encoding: info.encoding,
                delimiter: format_delimiter(info.delimiter),
                row_count: info.row_count,
                headers: info.headers,
                key_column: info.key_column,
                key_column_present: info.key_column_present,
                generated_at: Utc::now().to_rfc3339(),
            },
        }
    }
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({
        "jobId": Uuid::new_v4().to_string(),
        "status": "error",
        "error": error,
        "columns": [],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PivotOptions;
    use crate::transform::pipeline::pivot_bytes;

    #[test]
    fn test_response_from_result() {
        let result = pivot_bytes(
            "RU;EN\nмир;world\n".as_bytes(),
            &PivotOptions::default(),
            None,
        )
        .unwrap();
        let response = PivotResponse::from_result(result, Some("strings.csv".into()));

        assert_eq!(response.status, "ready");
        assert_eq!(response.columns.len(), 2);
        assert_eq!(response.columns[1].name, "EN");
        assert_eq!(response.columns[1].fragment, ",\n  \"мир\": \"world\"\n");
        assert_eq!(response.metadata.delimiter, ";");
        assert_eq!(response.metadata.row_count, 1);
    }

    #[test]
    fn test_camel_case_serialization() {
        let result = pivot_bytes(b"EN\nhello\n", &PivotOptions::default(), None).unwrap();
        let json = serde_json::to_value(PivotResponse::from_result(result, None)).unwrap();

        assert_eq!(json["status"], "warning");
        assert!(json["jobId"].is_string());
        assert!(json["fileName"].is_null());
        assert_eq!(json["metadata"]["rowCount"], 1);
        assert_eq!(json["metadata"]["keyColumn"], "RU");
        assert_eq!(json["metadata"]["keyColumnPresent"], false);
        assert!(json["metadata"]["generatedAt"].is_string());
    }

    #[test]
    fn test_error_response_shape() {
        let body = error_response("CSV file is empty");
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"], "CSV file is empty");
        assert!(body["columns"].as_array().unwrap().is_empty());
    }
}
