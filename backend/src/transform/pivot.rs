//! Column pivot: re-key every column by the key column.
//!
//! For each header `C`, records are walked in file order and
//! `record[key] → record[C]` is written whenever both cells are non-empty.
//! Records with an empty key or an empty cell are counted as skipped for
//! that column. Duplicate keys overwrite in place: the last record wins,
//! the first record fixes the position.
//!
//! # Example
//!
//! ```
//! use colsplit::parser::parse_str;
//! use colsplit::pivot_columns;
//! use colsplit::PivotOptions;
//!
//! let parsed = parse_str("RU,EN\nмир,world\n", ',').unwrap();
//! let result = pivot_columns(&parsed.records, &parsed.headers, &PivotOptions::default());
//!
//! assert_eq!(result.get("EN").unwrap().get("мир"), Some("world"));
//! ```

use crate::models::{ColumnPivot, PivotOptions, PivotResult, Record};

/// Pivot a single column against `key_column`.
pub fn pivot_column(records: &[Record], column: &str, key_column: &str) -> ColumnPivot {
    let mut pivot = ColumnPivot::new(column);

    for record in records {
        match (record.non_empty(key_column), record.non_empty(column)) {
            (Some(key), Some(value)) => {
                pivot.insert(key, value);
            }
            _ => pivot.mark_skipped(),
        }
    }

    pivot
}

/// Pivot every header against the configured key column.
///
/// The key column itself is included (as key → key) unless
/// `include_key_column` is off. A missing key column is not an error:
/// every mapping simply comes out empty.
pub fn pivot_columns(records: &[Record], headers: &[String], options: &PivotOptions) -> PivotResult {
    let columns = headers
        .iter()
        .filter(|h| options.include_key_column || **h != options.key_column)
        .map(|h| pivot_column(records, h, &options.key_column))
        .collect();

    PivotResult::new(options.key_column.clone(), columns)
}
