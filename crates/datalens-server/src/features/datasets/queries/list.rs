//! List datasets query

use serde::Serialize;
use sqlx::PgPool;

use crate::features::datasets::types::{DatasetResponse, DatasetRow, DATASET_COLUMNS};

/// Response for the dataset listing
///
/// An empty registry is not an error; `datasets` is simply empty.
#[derive(Debug, Serialize)]
pub struct ListDatasetsResponse {
    pub datasets: Vec<DatasetResponse>,
    pub total: usize,
}

/// Errors that can occur when listing datasets
#[derive(Debug, thiserror::Error)]
pub enum ListDatasetsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handles the list datasets query, newest upload first.
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool) -> Result<ListDatasetsResponse, ListDatasetsError> {
    let rows: Vec<DatasetRow> = sqlx::query_as(&format!(
        "SELECT {} FROM datasets ORDER BY upload_time DESC",
        DATASET_COLUMNS
    ))
    .fetch_all(&pool)
    .await?;

    let datasets: Vec<DatasetResponse> = rows.into_iter().map(Into::into).collect();

    Ok(ListDatasetsResponse {
        total: datasets.len(),
        datasets,
    })
}
