//! Write operations for datasets

pub mod delete;

pub use delete::{DeleteDatasetCommand, DeleteDatasetError};
