//! Shared utilities for feature modules

pub mod validation;

#[cfg(test)]
pub mod test_helpers;

pub use validation::{sanitize_filename, validate_upload_filename, FilenameValidationError};
