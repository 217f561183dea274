//! Domain models for the colsplit pipeline.
//!
//! - [`Record`] - One parsed CSV row (column name → cell value)
//! - [`PivotOptions`] - Key column selection for the pivot
//! - [`ColumnPivot`] - One column re-keyed by the key column
//! - [`PivotResult`] - All column pivots in header order

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key column used when nothing else is configured.
pub const DEFAULT_KEY_COLUMN: &str = "RU";

// =============================================================================
// Record
// =============================================================================

/// A parsed CSV row.
///
/// Every value is a string. Iteration follows header order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Build a record from `(column, value)` pairs, in header order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        )
    }

    /// Cell value for `column`, if the column exists.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).and_then(Value::as_str)
    }

    /// Cell value for `column`, treating absent and empty alike.
    pub fn non_empty(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|v| !v.is_empty())
    }

    /// Column names in header order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// Pivot Options
// =============================================================================

/// Options for the column pivot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotOptions {
    /// Column whose values become the mapping keys.
    pub key_column: String,

    /// Also pivot the key column onto itself (key → key).
    pub include_key_column: bool,
}

impl Default for PivotOptions {
    fn default() -> Self {
        Self {
            key_column: DEFAULT_KEY_COLUMN.to_string(),
            include_key_column: true,
        }
    }
}

impl PivotOptions {
    pub fn with_key_column(mut self, key_column: impl Into<String>) -> Self {
        self.key_column = key_column.into();
        self
    }

    pub fn with_key_column_included(mut self, include: bool) -> Self {
        self.include_key_column = include;
        self
    }
}

// =============================================================================
// Column Pivot
// =============================================================================

/// One column re-keyed by the key column.
///
/// Keys keep the position of their first insertion; a later write to the
/// same key replaces the value in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnPivot {
    column: String,
    entries: Map<String, Value>,
    skipped: usize,
}

impl ColumnPivot {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            entries: Map::new(),
            skipped: 0,
        }
    }

    /// Insert or overwrite `key`. Returns the replaced value, if any.
    pub fn insert(&mut self, key: &str, value: &str) -> Option<String> {
        self.entries
            .insert(key.to_string(), Value::String(value.to_string()))
            .and_then(|old| match old {
                Value::String(s) => Some(s),
                _ => None,
            })
    }

    pub(crate) fn mark_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// `(key, value)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|v| (k.as_str(), v)))
    }

    /// Number of records skipped because the key or the cell was empty.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The mapping as a JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }

    pub fn to_json_value(&self) -> Value {
        Value::Object(self.entries.clone())
    }
}

// =============================================================================
// Pivot Result
// =============================================================================

/// All column pivots, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PivotResult {
    key_column: String,
    columns: Vec<ColumnPivot>,
}

impl PivotResult {
    pub fn new(key_column: impl Into<String>, columns: Vec<ColumnPivot>) -> Self {
        Self {
            key_column: key_column.into(),
            columns,
        }
    }

    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    pub fn get(&self, column: &str) -> Option<&ColumnPivot> {
        self.columns.iter().find(|c| c.column() == column)
    }

    pub fn columns(&self) -> &[ColumnPivot] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(ColumnPivot::column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The whole result as `{ column: { key: value } }`.
    pub fn to_json_value(&self) -> Value {
        Value::Object(
            self.columns
                .iter()
                .map(|c| (c.column().to_string(), c.to_json_value()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_lookup() {
        let record = Record::from_pairs([("RU", "мир"), ("EN", "world"), ("DE", "")]);

        assert_eq!(record.get("EN"), Some("world"));
        assert_eq!(record.get("DE"), Some(""));
        assert_eq!(record.non_empty("DE"), None);
        assert_eq!(record.get("FR"), None);
        assert_eq!(record.columns().collect::<Vec<_>>(), vec!["RU", "EN", "DE"]);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut pivot = ColumnPivot::new("EN");
        pivot.insert("a", "1");
        pivot.insert("b", "2");
        let old = pivot.insert("a", "3");

        assert_eq!(old.as_deref(), Some("1"));
        assert_eq!(
            pivot.entries().collect::<Vec<_>>(),
            vec![("a", "3"), ("b", "2")]
        );
    }

    #[test]
    fn test_default_options() {
        let opts = PivotOptions::default();
        assert_eq!(opts.key_column, "RU");
        assert!(opts.include_key_column);
    }
}
