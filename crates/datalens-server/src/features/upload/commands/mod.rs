//! Write operations for uploads

pub mod ingest;

pub use ingest::{IngestCsvCommand, IngestCsvError};
