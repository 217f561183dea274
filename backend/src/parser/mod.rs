//! CSV parser with encoding and delimiter auto-detection.
//!
//! Turns CSV text into [`Record`]s keyed by the header row. Knows nothing
//! about pivoting.

use csv::{ReaderBuilder, StringRecord};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::models::Record;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Delimiters tried by [`detect_delimiter`], in tie-break order.
const DELIMITER_CANDIDATES: [char; 4] = [',', ';', '\t', '|'];

/// Result of parsing with metadata
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    /// Parsed records, one per non-blank data row
    pub records: Vec<Record>,
    /// Column headers, in file order
    pub headers: Vec<String>,
    /// Detected or used encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
}

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 (with or without BOM) always wins; anything else is handed
/// to chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if std::str::from_utf8(body).is_ok() {
        return "utf-8".to_string();
    }

    let (charset, _confidence, _language) = chardet::detect(bytes);

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        "maccyrillic" => "x-mac-cyrillic".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the given encoding label.
///
/// A leading BOM is consumed. Unknown labels fall back to UTF-8 and
/// malformed sequences become U+FFFD, so this never fails.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let codec = encoding_rs::Encoding::for_label(encoding.trim().as_bytes()).unwrap_or_else(|| {
        tracing::debug!(encoding, "unknown encoding label, falling back to utf-8");
        encoding_rs::UTF_8
    });

    let (text, used, had_errors) = codec.decode(bytes);
    if had_errors {
        tracing::warn!(encoding = used.name(), "malformed byte sequences replaced while decoding");
    }
    text.into_owned()
}

/// Detect the delimiter by counting occurrences in the first non-blank line.
///
/// Falls back to `,` when no candidate appears.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content
        .lines()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("");

    let mut best_sep = DELIMITER_CANDIDATES[0];
    let mut best_count = 0;

    for &sep in &DELIMITER_CANDIDATES {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse a user-supplied delimiter name.
///
/// Accepts `tab` or `\\t` for a tab, otherwise exactly one ASCII character.
pub fn parse_delimiter(value: &str) -> Option<char> {
    match value {
        "tab" | "TAB" | "\\t" | "\t" => Some('\t'),
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Some(c),
                _ => None,
            }
        }
    }
}

/// Parse decoded CSV text with an explicit delimiter.
///
/// The first non-blank row is the header. Whitespace around unquoted
/// cells and headers is trimmed, quoted cells keep theirs verbatim. Blank
/// lines are skipped and every data row must have exactly as many
/// fields as the header.
///
/// # Example
/// ```
/// use colsplit::parser::parse_str;
///
/// let result = parse_str("RU,EN\nмир,world\n", ',').unwrap();
///
/// assert_eq!(result.headers, vec!["RU", "EN"]);
/// assert_eq!(result.records[0].get("EN"), Some("world"));
/// ```
pub fn parse_str(content: &str, delimiter: char) -> CsvResult<ParseResult> {
    parse_with_encoding(content, delimiter, "utf-8".to_string())
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<ParseResult> {
    parse_bytes_with(bytes, None)
}

/// Parse CSV bytes, detecting the encoding and, unless given, the delimiter.
pub fn parse_bytes_with(bytes: &[u8], delimiter: Option<char>) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));

    parse_with_encoding(&content, delimiter, encoding)
}

/// Parse a CSV file with auto-detection of encoding and delimiter.
///
/// # Example
/// ```ignore
/// let result = parse_csv_file_auto("/path/to/translations.csv")?;
/// println!("Encoding: {}, Delimiter: '{}'", result.encoding, result.delimiter);
/// println!("Records: {}", result.records.len());
/// ```
pub fn parse_csv_file_auto<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes_auto(&bytes)
}

fn parse_with_encoding(content: &str, delimiter: char, encoding: String) -> CsvResult<ParseResult> {
    if !delimiter.is_ascii() {
        return Err(CsvError::Delimiter(delimiter));
    }

    let content = trim_unquoted(content, delimiter);
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut headers: Option<Vec<String>> = None;
    let mut records = Vec::new();

    for result in reader.records() {
        let row = result.map_err(malformed)?;

        if is_blank(&row) {
            continue;
        }

        let columns = match &headers {
            Some(columns) => columns,
            None => {
                headers = Some(read_headers(&row)?);
                continue;
            }
        };

        if row.len() != columns.len() {
            return Err(CsvError::FieldCount {
                line: line_of(&row),
                expected: columns.len(),
                found: row.len(),
            });
        }

        records.push(Record::from_pairs(columns.iter().cloned().zip(row.iter())));
    }

    let headers = headers.ok_or(CsvError::EmptyFile)?;

    Ok(ParseResult {
        records,
        headers,
        encoding,
        delimiter,
    })
}

/// Drop whitespace next to delimiters and line breaks outside of quotes.
///
/// `csv::Trim` trims after unquoting, which would also eat padding inside
/// `"Hello, "`. Interior whitespace of unquoted cells is kept, and leading
/// whitespace before an opening quote is dropped so the quote still starts
/// the field.
fn trim_unquoted(content: &str, delimiter: char) -> String {
    let mut out = String::with_capacity(content.len());
    let mut pending = String::new();
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            out.push(c);
            if c == '"' {
                match chars.peek() {
                    Some('"') => {
                        out.push('"');
                        chars.next();
                    }
                    _ => in_quotes = false,
                }
            }
            continue;
        }

        if c == delimiter || c == '\n' || c == '\r' {
            pending.clear();
            out.push(c);
            at_field_start = true;
        } else if c.is_whitespace() {
            if !at_field_start {
                pending.push(c);
            }
        } else {
            if c == '"' && at_field_start {
                in_quotes = true;
            }
            out.push_str(&pending);
            pending.clear();
            out.push(c);
            at_field_start = false;
        }
    }

    out
}

fn read_headers(row: &StringRecord) -> CsvResult<Vec<String>> {
    let mut seen = HashSet::new();
    let mut headers = Vec::with_capacity(row.len());

    for name in row.iter() {
        if !seen.insert(name) {
            return Err(CsvError::DuplicateHeader(name.to_string()));
        }
        headers.push(name.to_string());
    }

    Ok(headers)
}

/// An empty or whitespace-only line comes back as a single empty field
/// once unquoted whitespace is trimmed.
fn is_blank(row: &StringRecord) -> bool {
    row.len() <= 1 && row.iter().all(str::is_empty)
}

fn line_of(row: &StringRecord) -> u64 {
    row.position().map(|p| p.line()).unwrap_or(0)
}

fn malformed(err: csv::Error) -> CsvError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => CsvError::Io(e),
        _ => CsvError::Malformed { line, message },
    }
}
