//! HTTP service uploading CSV files to the backend.

use gloo_net::http::Request;
use web_sys::{File, FormData};

use crate::types::{AppError, AppResult, PivotResponse};

/// Upload a CSV file and get one fragment per column back.
pub async fn upload_csv(file: File, backend_url: &str) -> AppResult<PivotResponse> {
    let form_data = FormData::new()
        .map_err(|e| AppError::Network(format!("Failed to create FormData: {:?}", e)))?;

    form_data
        .append_with_blob_and_filename("file", &file, &file.name())
        .map_err(|e| AppError::Network(format!("Failed to append file: {:?}", e)))?;

    let url = format!("{}/api/pivot", backend_url);
    let request = Request::post(&url)
        .body(form_data)
        .map_err(|e| AppError::Network(format!("Failed to build request: {}", e)))?;

    let response = request
        .send()
        .await
        .map_err(|e| AppError::Network(format!("HTTP request failed: {}", e)))?;

    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Upload(error_message(response.status(), &body)));
    }

    response
        .json::<PivotResponse>()
        .await
        .map_err(|e| AppError::Network(format!("Failed to parse response: {}", e)))
}

/// Pull the `error` field out of an error body, falling back to the raw text.
fn error_message(status: u16, body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error")?.as_str().map(str::to_string))
        .unwrap_or_else(|| {
            if body.is_empty() {
                "Unknown error".to_string()
            } else {
                body.to_string()
            }
        });
    format!("{detail} ({status})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "jobId": "123e4567-e89b-12d3-a456-426614174000",
            "status": "ready",
            "fileName": "strings.csv",
            "columns": [
                {"name": "RU", "fragment": ",\n  \"мир\": \"мир\"\n", "entries": 1, "skipped": 0},
                {"name": "EN", "fragment": ",\n  \"мир\": \"world\"\n", "entries": 1, "skipped": 0}
            ],
            "metadata": {
                "encoding": "utf-8",
                "delimiter": ",",
                "rowCount": 1,
                "headers": ["RU", "EN"],
                "keyColumn": "RU",
                "keyColumnPresent": true,
                "generatedAt": "2025-01-01T00:00:00+00:00"
            }
        }"#;

        let response: PivotResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, "ready");
        assert_eq!(response.columns[1].name, "EN");
        assert_eq!(response.metadata.row_count, 1);
        assert!(response.metadata.key_column_present);
    }

    #[test]
    fn test_error_message_from_json_body() {
        let body = r#"{"jobId":"x","status":"error","error":"CSV error: CSV file is empty","columns":[]}"#;
        assert_eq!(error_message(422, body), "CSV error: CSV file is empty (422)");
    }

    #[test]
    fn test_error_message_from_text_body() {
        assert_eq!(error_message(413, "length limit exceeded"), "length limit exceeded (413)");
        assert_eq!(error_message(500, ""), "Unknown error (500)");
    }
}
