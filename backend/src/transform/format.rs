//! Fragment rendering for copy/paste into an existing JSON object.
//!
//! A column mapping is pretty-printed with 2-space indentation, then its
//! outermost braces are rewritten: the leading `{` becomes `,` and the
//! trailing `}` is dropped. Everything in between is left untouched, so
//! the fragment can be appended after the last member of another object.
//!
//! ```text
//! {                    ,
//!   "мир": "world"  →    "мир": "world"
//! }
//! ```

use crate::models::{ColumnPivot, PivotResult};

/// Pretty-print a column mapping (2-space indent, insertion order).
pub fn to_pretty_json(pivot: &ColumnPivot) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(pivot.as_map())
}

/// Replace a leading `{` with `,` and drop a trailing `}`.
///
/// Only the outermost braces are touched; text without them passes
/// through unchanged.
pub fn strip_outer_braces(json: &str) -> String {
    let mut out = match json.strip_prefix('{') {
        Some(rest) => format!(",{rest}"),
        None => json.to_string(),
    };
    if out.ends_with('}') {
        out.pop();
    }
    out
}

/// Render a column mapping as a paste-ready fragment.
pub fn format_fragment(pivot: &ColumnPivot) -> Result<String, serde_json::Error> {
    to_pretty_json(pivot).map(|json| strip_outer_braces(&json))
}

/// Render the whole result as one `{ column: { key: value } }` document.
pub fn format_document(result: &PivotResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&result.to_json_value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn pivot(pairs: &[(&str, &str)]) -> ColumnPivot {
        let mut p = ColumnPivot::new("EN");
        for (k, v) in pairs {
            p.insert(k, v);
        }
        p
    }

    #[test]
    fn test_pretty_json_two_space_indent() {
        let json = to_pretty_json(&pivot(&[("a", "1"), ("b", "2")])).unwrap();
        assert_eq!(json, "{\n  \"a\": \"1\",\n  \"b\": \"2\"\n}");
    }

    #[test]
    fn test_fragment_exact_text() {
        let fragment = format_fragment(&pivot(&[("a", "1"), ("b", "2")])).unwrap();
        assert_eq!(fragment, ",\n  \"a\": \"1\",\n  \"b\": \"2\"\n");
    }

    #[test]
    fn test_fragment_keeps_non_ascii_unescaped() {
        let fragment = format_fragment(&pivot(&[("привет", "hello")])).unwrap();
        assert_eq!(fragment, ",\n  \"привет\": \"hello\"\n");
    }

    #[test]
    fn test_fragment_embeds_into_object() {
        let fragment = format_fragment(&pivot(&[("a", "1"), ("b", "2")])).unwrap();
        assert!(fragment.starts_with(','));
        assert!(!fragment.trim_end().ends_with('}'));

        let doc = format!("{{\"existing\": \"x\"{fragment}}}");
        let parsed: Value = serde_json::from_str(&doc).unwrap();
        assert_eq!(parsed["existing"], "x");
        assert_eq!(parsed["a"], "1");
        assert_eq!(parsed["b"], "2");
    }

    #[test]
    fn test_inner_braces_untouched() {
        let fragment = format_fragment(&pivot(&[("{key}", "{value}")])).unwrap();
        assert_eq!(fragment, ",\n  \"{key}\": \"{value}\"\n");
    }

    #[test]
    fn test_empty_mapping_fragment() {
        assert_eq!(format_fragment(&pivot(&[])).unwrap(), ",");
    }

    #[test]
    fn test_strip_outer_braces_without_braces() {
        assert_eq!(strip_outer_braces("plain"), "plain");
        assert_eq!(strip_outer_braces("{x"), ",x");
        assert_eq!(strip_outer_braces("x}"), "x");
    }

    #[test]
    fn test_document() {
        let result = PivotResult::new("RU", vec![pivot(&[("мир", "world")])]);
        let doc = format_document(&result).unwrap();
        let parsed: Value = serde_json::from_str(&doc).unwrap();
        assert_eq!(parsed["EN"]["мир"], "world");
    }
}
