//! End-to-end pipeline tests over files on disk.

use std::io::Write;

use colsplit::{pivot_csv, CsvError, PipelineError, PivotOptions, PivotResponse};
use serde_json::Value;
use tempfile::NamedTempFile;

fn create_temp_csv(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file
}

#[test]
fn test_translations_scenario() {
    let file = create_temp_csv("RU,EN,DE\nпривет,hello,hallo\nмир,world,\n".as_bytes());
    let result = pivot_csv(file.path(), &PivotOptions::default(), None).unwrap();

    let en = result.pivots.get("EN").unwrap();
    assert_eq!(en.get("привет"), Some("hello"));
    assert_eq!(en.get("мир"), Some("world"));
    assert_eq!(en.len(), 2);

    let de = result.pivots.get("DE").unwrap();
    assert_eq!(de.get("привет"), Some("hallo"));
    assert_eq!(de.get("мир"), None);
    assert_eq!(de.len(), 1);

    // Self-pivot of the key column is kept by default
    let ru = result.pivots.get("RU").unwrap();
    assert_eq!(ru.get("мир"), Some("мир"));
}

#[test]
fn test_fragments_append_to_existing_object() {
    let file = create_temp_csv("RU;EN\nда;yes\nнет;no\n".as_bytes());
    let result = pivot_csv(file.path(), &PivotOptions::default(), None).unwrap();

    let en = result.select(&["EN".to_string()]).unwrap()[0];
    let merged = format!("{{\n  \"existing\": \"value\"{}}}", en.fragment);
    let doc: Value = serde_json::from_str(&merged).unwrap();

    assert_eq!(doc["existing"], "value");
    assert_eq!(doc["да"], "yes");
    assert_eq!(doc["нет"], "no");
}

#[test]
fn test_windows_1251_file() {
    let (bytes, _, _) = encoding_rs::WINDOWS_1251.encode(
        "RU;EN\nпривет мир;hello world\nдобрый день;good afternoon\nспасибо;thank you\n",
    );
    let file = create_temp_csv(&bytes);

    let result = pivot_csv(file.path(), &PivotOptions::default(), None).unwrap();

    assert_ne!(result.csv_info.encoding, "utf-8");
    assert_eq!(result.csv_info.delimiter, ';');
    assert_eq!(result.csv_info.headers, vec!["RU", "EN"]);

    let en = result.pivots.get("EN").unwrap();
    assert_eq!(en.len(), 3);
    assert!(en.entries().any(|(_, value)| value == "thank you"));
}

#[test]
fn test_excluded_key_column() {
    let file = create_temp_csv(b"RU,EN\na,b\n");
    let options = PivotOptions::default().with_key_column_included(false);
    let result = pivot_csv(file.path(), &options, None).unwrap();

    let names: Vec<_> = result.pivots.column_names().collect();
    assert_eq!(names, vec!["EN"]);
}

#[test]
fn test_custom_key_column() {
    let file = create_temp_csv(b"RU,EN,DE\n,hello,hallo\n,world,welt\n");
    let options = PivotOptions::default().with_key_column("EN");
    let result = pivot_csv(file.path(), &options, None).unwrap();

    let de = result.pivots.get("DE").unwrap();
    assert_eq!(de.get("world"), Some("welt"));
    assert_eq!(result.pivots.get("RU").unwrap().skipped(), 2);
}

#[test]
fn test_header_only_file() {
    let file = create_temp_csv(b"RU,EN,DE\n");
    let result = pivot_csv(file.path(), &PivotOptions::default(), None).unwrap();

    assert_eq!(result.csv_info.row_count, 0);
    assert_eq!(result.csv_info.headers, vec!["RU", "EN", "DE"]);
    assert!(result.fragments.iter().all(|f| f.fragment == ","));
}

#[test]
fn test_empty_file_fails() {
    let file = create_temp_csv(b"");
    let err = pivot_csv(file.path(), &PivotOptions::default(), None).unwrap_err();

    assert!(matches!(err, PipelineError::Csv(CsvError::EmptyFile)));
}

#[test]
fn test_ragged_row_fails_without_partial_result() {
    let file = create_temp_csv(b"RU,EN\na,b\nc\n");
    let err = pivot_csv(file.path(), &PivotOptions::default(), None).unwrap_err();

    match err {
        PipelineError::Csv(CsvError::FieldCount { line, expected, found }) => {
            assert_eq!(line, 3);
            assert_eq!(expected, 2);
            assert_eq!(found, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_file() {
    let err = pivot_csv(
        std::path::Path::new("/nonexistent/translations.csv"),
        &PivotOptions::default(),
        None,
    )
    .unwrap_err();

    assert!(matches!(err, PipelineError::Csv(CsvError::Io(_))));
}

#[test]
fn test_response_round_trip_for_frontend() {
    let file = create_temp_csv(b"RU\tEN\nkey\tvalue\n");
    let result = pivot_csv(file.path(), &PivotOptions::default(), None).unwrap();
    let response = PivotResponse::from_result(result, Some("t.csv".into()));

    let json = serde_json::to_string(&response).unwrap();
    let back: PivotResponse = serde_json::from_str(&json).unwrap();

    assert_eq!(back.metadata.delimiter, "TAB");
    assert_eq!(back.columns, response.columns);
}

#[test]
fn test_quoted_padding_survives_into_fragment() {
    let file = create_temp_csv("RU,EN\n\"Привет, \", \"Hello, \"\nмир , world \n".as_bytes());
    let result = pivot_csv(file.path(), &PivotOptions::default(), Some(',')).unwrap();

    let en = result.select(&["EN".to_string()]).unwrap()[0];
    assert_eq!(
        en.fragment,
        ",\n  \"Привет, \": \"Hello, \",\n  \"мир\": \"world\"\n"
    );
}
