//! Get dataset query

use sqlx::PgPool;
use uuid::Uuid;

use crate::features::datasets::types::{DatasetResponse, DatasetRow, DATASET_COLUMNS};

/// Errors that can occur when retrieving a dataset
#[derive(Debug, thiserror::Error)]
pub enum GetDatasetError {
    #[error("Dataset '{0}' not found")]
    NotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handles the get dataset query
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, id: Uuid) -> Result<DatasetResponse, GetDatasetError> {
    let row: Option<DatasetRow> = sqlx::query_as(&format!(
        "SELECT {} FROM datasets WHERE id = $1",
        DATASET_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&pool)
    .await?;

    row.map(Into::into).ok_or(GetDatasetError::NotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::seed_dataset;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_get_unknown_dataset(pool: PgPool) -> sqlx::Result<()> {
        let result = handle(pool, Uuid::new_v4()).await;
        assert!(matches!(result, Err(GetDatasetError::NotFound(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_get_returns_metadata(pool: PgPool) -> sqlx::Result<()> {
        let id = seed_dataset(&pool, "sales", &["date", "category", "value"]).await?;

        let response = handle(pool, id).await.unwrap();
        assert_eq!(response.id, id);
        assert_eq!(response.name, "sales");
        assert_eq!(response.column_names, vec!["date", "category", "value"]);
        Ok(())
    }
}
