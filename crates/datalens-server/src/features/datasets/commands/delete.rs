//! Delete dataset command
//!
//! A single DELETE statement; the records go with the dataset through the
//! cascade in the schema, so readers can never observe a half-deleted
//! dataset.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Command to delete a dataset and all of its records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDatasetCommand {
    pub id: Uuid,
}

/// Response from deleting a dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDatasetResponse {
    pub id: Uuid,
    pub deleted: bool,
}

/// Errors that can occur when deleting a dataset
#[derive(Debug, thiserror::Error)]
pub enum DeleteDatasetError {
    #[error("Dataset '{0}' not found")]
    NotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handles the delete dataset command
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    command: DeleteDatasetCommand,
) -> Result<DeleteDatasetResponse, DeleteDatasetError> {
    let result = sqlx::query("DELETE FROM datasets WHERE id = $1")
        .bind(command.id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DeleteDatasetError::NotFound(command.id));
    }

    tracing::info!(dataset_id = %command.id, "dataset deleted");

    Ok(DeleteDatasetResponse {
        id: command.id,
        deleted: true,
    })
}
