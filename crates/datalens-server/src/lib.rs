//! DataLens Server Library
//!
//! HTTP backend for the DataLens CSV analytics dashboard.
//!
//! # Overview
//!
//! The server ingests uploaded CSV files into Postgres and serves aggregate
//! statistics and chart-ready projections over a REST API:
//!
//! - **Upload**: multipart CSV upload, validated and persisted atomically
//! - **Datasets**: metadata listing, retrieval, and cascade deletion
//! - **Analytics**: summary statistics and bar/pie/line chart projections
//!
//! # Architecture
//!
//! Feature slices under [`features`] follow a command/query split: write
//! operations (`commands/`) and read operations (`queries/`) each live in
//! their own module with a request struct, a `validate()` step, a typed
//! error enum, and an async `handle(pool, ...)` function. Routes translate
//! those errors into HTTP responses via [`error::AppError`].
//!
//! The CSV decoding and row normalization rules live in [`ingest`], kept
//! separate from persistence so they can be tested without a database.
//!
//! ## Framework stack
//!
//! - **Axum** for routing and multipart extraction
//! - **SQLx** (Postgres) for storage, with migrations applied at startup
//! - **Tower / tower-http** for compression, tracing, and CORS middleware

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod ingest;
pub mod middleware;

// Re-export commonly used types
pub use error::{AppError, AppResult};
