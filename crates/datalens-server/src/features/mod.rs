//! Feature modules implementing the DataLens API
//!
//! Each feature is a vertical slice with its own commands, queries, and
//! routes:
//!
//! - **datasets**: dataset registry, summary statistics, chart projections
//! - **upload**: multipart CSV upload and ingestion
//! - **shared**: validation helpers and test fixtures used across slices
//!
//! # Architecture
//!
//! Each feature module follows the structure:
//! - `commands/` - Write operations (ingest, delete)
//! - `queries/` - Read operations (list, get, summary, chart data)
//! - `routes.rs` - HTTP route definitions
//! - `types.rs` - Shared types (if needed)

pub mod datasets;
pub mod shared;
pub mod upload;

use axum::Router;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// PostgreSQL connection pool for database operations
    pub db: sqlx::PgPool,
}

/// Creates the main API router with all feature routes mounted
///
/// Each feature is mounted under its own path prefix:
/// - `/datasets` - Registry, summary, and chart endpoints
/// - `/upload` - CSV upload
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .nest("/datasets", datasets::datasets_routes().with_state(state.db.clone()))
        .nest("/upload", upload::upload_routes().with_state(state.db.clone()))
}
