//! CSV decoding and cell coercion
//!
//! Pure parsing functions, kept free of persistence concerns so the
//! normalization rules can be tested directly against raw bytes.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use datalens_common::{Error, Result};
use serde_json::Value;

/// A decoded CSV file: the header row plus every data row as raw strings.
///
/// Rows may be ragged (shorter or longer than the header); missing cells are
/// treated as empty downstream.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Decode raw bytes as delimited tabular text with a header row.
///
/// Fails with a parse error when the byte stream is not valid CSV (e.g.
/// unbalanced quotes or invalid UTF-8).
pub fn parse(raw: &[u8]) -> Result<CsvTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(raw);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| Error::parse(format!("Unable to read CSV header: {}", e)))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record =
            result.map_err(|e| Error::parse(format!("Unable to parse CSV row: {}", e)))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(CsvTable { columns, rows })
}

/// Calendar-date formats accepted for the `date` column.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Timestamp formats accepted for the `date` column (truncated to the date).
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Lenient calendar-date parsing for a raw cell.
///
/// Returns `None` for empty or unparsable cells; a bad date never rejects
/// the row it came from.
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    let s = cell.trim();
    if s.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    None
}

/// Coerce a raw cell to a floating-point value.
///
/// Returns `None` for empty, unparsable, or non-finite cells.
pub fn parse_value(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Tag a raw cell as a typed JSON value for the metadata mapping.
///
/// Empty cells become null; boolean and numeric literals keep their type;
/// everything else is preserved verbatim as a string.
pub fn cell_value(cell: &str) -> Value {
    let s = cell.trim();
    if s.is_empty() {
        return Value::Null;
    }

    match s.to_ascii_lowercase().as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {},
    }

    if let Ok(int) = s.parse::<i64>() {
        return Value::from(int);
    }
    if let Ok(float) = s.parse::<f64>() {
        if float.is_finite() {
            if let Some(number) = serde_json::Number::from_f64(float) {
                return Value::Number(number);
            }
        }
    }

    Value::String(cell.to_string())
}
