//! CSV ingestion pipeline
//!
//! Turns an uploaded CSV byte stream into validated, typed records:
//!
//! 1. [`parser::parse`] decodes the bytes into a [`parser::CsvTable`]
//! 2. [`validate_structure`] rejects structurally invalid files
//! 3. [`transform`] normalizes each row into a [`NewRecord`]
//!
//! Row-level problems (unparsable date, missing category or value) are
//! normalized with defaults rather than rejecting the row; only file-level
//! structure failures abort ingestion. Persistence happens in
//! `features::upload::commands::ingest`.

pub mod parser;

use chrono::NaiveDate;
use serde_json::{Map, Value};
use thiserror::Error;

use parser::CsvTable;

/// Columns every uploaded CSV must declare. `date` is optional.
pub const REQUIRED_COLUMNS: &[&str] = &["category", "value"];

/// Category substituted when the cell is empty or the column is shorter
/// than the header.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// A transformed row, ready to be stamped with a dataset id and persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub date: Option<NaiveDate>,
    pub category: String,
    pub value: f64,
    pub metadata: Map<String, Value>,
}

/// Structural validation failures for an uploaded CSV
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CsvValidationError {
    /// The file parsed but holds zero data rows
    #[error("The uploaded CSV file contains no data.")]
    Empty,

    /// One or more required columns are absent from the header
    #[error("Missing required columns in CSV: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Validate the structure of a parsed CSV.
///
/// # Errors
///
/// - `Empty` - the table has no data rows
/// - `MissingColumns` - names exactly which of the required columns are absent
pub fn validate_structure(table: &CsvTable) -> Result<(), CsvValidationError> {
    if table.rows.is_empty() {
        return Err(CsvValidationError::Empty);
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !table.columns.iter().any(|column| column == *required))
        .map(|required| required.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(CsvValidationError::MissingColumns(missing));
    }

    Ok(())
}

/// Transform every data row into a [`NewRecord`], order preserving.
///
/// Defaulting rules:
/// - `date`: lenient parse; unparsable cells record absence, not failure
/// - `category`: empty cells become [`DEFAULT_CATEGORY`]
/// - `value`: empty or unparsable cells become `0.0`
/// - `metadata`: every other header column, in header order, as tagged values
pub fn transform(table: &CsvTable) -> Vec<NewRecord> {
    let date_idx = column_index(table, "date");
    let category_idx = column_index(table, "category");
    let value_idx = column_index(table, "value");

    let metadata_columns: Vec<(usize, &str)> = table
        .columns
        .iter()
        .enumerate()
        .filter(|(_, name)| !matches!(name.as_str(), "date" | "category" | "value"))
        .map(|(idx, name)| (idx, name.as_str()))
        .collect();

    table
        .rows
        .iter()
        .map(|row| {
            let cell = |idx: Option<usize>| -> &str {
                idx.and_then(|i| row.get(i)).map(String::as_str).unwrap_or("")
            };

            let date_cell = cell(date_idx);
            let date = parser::parse_date(date_cell);
            if date.is_none() && !date_cell.trim().is_empty() {
                tracing::debug!(cell = %date_cell, "skipping unparsable date cell");
            }

            let category_cell = cell(category_idx);
            let category = if category_cell.trim().is_empty() {
                DEFAULT_CATEGORY.to_string()
            } else {
                category_cell.to_string()
            };

            let value_cell = cell(value_idx);
            let value = match parser::parse_value(value_cell) {
                Some(v) => v,
                None => {
                    if !value_cell.trim().is_empty() {
                        tracing::debug!(cell = %value_cell, "defaulting unparsable value cell");
                    }
                    0.0
                },
            };

            let metadata: Map<String, Value> = metadata_columns
                .iter()
                .map(|(idx, name)| (name.to_string(), parser::cell_value(cell(Some(*idx)))))
                .collect();

            NewRecord {
                date,
                category,
                value,
                metadata,
            }
        })
        .collect()
}

fn column_index(table: &CsvTable, name: &str) -> Option<usize> {
    table.columns.iter().position(|column| column == name)
}
