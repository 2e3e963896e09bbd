//! Shared dataset row and wire types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

/// Column list selected by every dataset query, in wire order.
pub const DATASET_COLUMNS: &str =
    "id, name, description, filename, upload_time, row_count, column_names, created_at, updated_at";

/// Database row shape for the `datasets` table
#[derive(Debug, sqlx::FromRow)]
pub struct DatasetRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub filename: String,
    pub upload_time: DateTime<Utc>,
    pub row_count: i32,
    pub column_names: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Dataset metadata as served to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub filename: String,
    pub upload_time: DateTime<Utc>,
    pub row_count: i32,
    pub column_names: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DatasetRow> for DatasetResponse {
    fn from(row: DatasetRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            filename: row.filename,
            upload_time: row.upload_time,
            row_count: row.row_count,
            column_names: row.column_names.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
