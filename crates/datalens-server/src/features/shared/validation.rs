//! Shared validation utilities
//!
//! Filename checks and normalization for uploaded files.

use thiserror::Error;

/// Errors that can occur during upload filename validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilenameValidationError {
    #[error("No selected file")]
    Required,

    #[error("Filename must not exceed {max_length} characters")]
    TooLong { max_length: usize },

    #[error("Invalid file format. Only .csv files are supported.")]
    NotCsv,
}

/// Validate an uploaded filename
///
/// # Rules
/// - Must not be empty (after trimming whitespace)
/// - Must not exceed max_length characters
/// - Must carry a `.csv` extension (case-insensitive)
pub fn validate_upload_filename(
    filename: &str,
    max_length: usize,
) -> Result<(), FilenameValidationError> {
    if filename.trim().is_empty() {
        return Err(FilenameValidationError::Required);
    }

    if filename.len() > max_length {
        return Err(FilenameValidationError::TooLong { max_length });
    }

    if !filename.to_ascii_lowercase().ends_with(".csv") {
        return Err(FilenameValidationError::NotCsv);
    }

    Ok(())
}

/// Normalize a client-supplied filename for storage.
///
/// Keeps only the final path component, drops control characters, and
/// replaces spaces with underscores. Leading dots are stripped so relative
/// or hidden names cannot survive. Falls back to `"upload.csv"` when
/// nothing usable remains.
pub fn sanitize_filename(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);

    let cleaned: String = base
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();

    let cleaned = cleaned.trim_start_matches(['.', '_']).to_string();

    if cleaned.is_empty() {
        "upload.csv".to_string()
    } else {
        cleaned
    }
}
