//! Property tests for parsing, pivoting and fragment rendering.

use colsplit::{format_fragment, parse_str, pivot_columns, PivotOptions};
use proptest::prelude::*;
use serde_json::{Map, Value};

const HEADERS: [&str; 3] = ["RU", "EN", "DE"];

fn cell() -> impl Strategy<Value = String> {
    "[a-zа-я]{0,4}"
}

fn rows() -> impl Strategy<Value = Vec<[String; 3]>> {
    prop::collection::vec([cell(), cell(), cell()], 0..24)
}

fn to_csv(rows: &[[String; 3]]) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS).unwrap();
    for row in rows {
        writer.write_record(row).unwrap();
    }
    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}

fn headers() -> Vec<String> {
    HEADERS.iter().map(|h| h.to_string()).collect()
}

proptest! {
    #[test]
    fn every_row_becomes_a_full_record(rows in rows()) {
        let parsed = parse_str(&to_csv(&rows), ',').unwrap();

        prop_assert_eq!(parsed.records.len(), rows.len());
        for record in &parsed.records {
            prop_assert_eq!(record.len(), HEADERS.len());
        }
    }

    #[test]
    fn membership_and_last_write_wins(rows in rows()) {
        let parsed = parse_str(&to_csv(&rows), ',').unwrap();
        let result = pivot_columns(&parsed.records, &headers(), &PivotOptions::default());

        for (col, name) in HEADERS.iter().enumerate() {
            let pivot = result.get(name).unwrap();

            let mut expected: Map<String, Value> = Map::new();
            let mut skipped = 0;
            for row in &rows {
                if !row[0].is_empty() && !row[col].is_empty() {
                    expected.insert(row[0].clone(), Value::String(row[col].clone()));
                } else {
                    skipped += 1;
                }
            }

            prop_assert_eq!(pivot.as_map(), &expected);
            prop_assert_eq!(pivot.skipped(), skipped);
        }
    }

    #[test]
    fn parsing_and_pivoting_is_idempotent(rows in rows()) {
        let text = to_csv(&rows);

        let first = parse_str(&text, ',').unwrap();
        let second = parse_str(&text, ',').unwrap();
        prop_assert_eq!(&first, &second);

        let options = PivotOptions::default();
        prop_assert_eq!(
            pivot_columns(&first.records, &headers(), &options),
            pivot_columns(&second.records, &headers(), &options)
        );
    }

    #[test]
    fn fragments_embed_into_an_object(rows in rows()) {
        let parsed = parse_str(&to_csv(&rows), ',').unwrap();
        let result = pivot_columns(&parsed.records, &headers(), &PivotOptions::default());

        for pivot in result.columns() {
            let fragment = format_fragment(pivot).unwrap();
            prop_assert!(fragment.starts_with(','));
            prop_assert!(!fragment.trim_end().ends_with('}'), "fragment keeps a trailing brace");
            if pivot.is_empty() {
                prop_assert_eq!(fragment.as_str(), ",");
                continue;
            }

            let embedded = format!("{{\"_\": 0{fragment}}}");
            let doc: Map<String, Value> = serde_json::from_str(&embedded).unwrap();
            prop_assert_eq!(doc.len(), pivot.len() + 1);
            for (key, value) in pivot.entries() {
                prop_assert_eq!(doc.get(key).and_then(Value::as_str), Some(value));
            }
        }
    }
}
