//! Summary statistics query
//!
//! Scalar aggregates over a dataset's records. All numeric aggregates are
//! 0.0 for an empty dataset and the date range is null when no record
//! carries a date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Observed span of record dates, absent when no record has a date.
///
/// `NaiveDate` serializes as an ISO `YYYY-MM-DD` string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

/// Summary statistics for a dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStatsResponse {
    pub dataset_id: Uuid,
    pub total_records: i64,
    pub date_range: DateRange,
    pub category_count: i64,
    pub total_value: f64,
    pub avg_value: f64,
    pub min_value: f64,
    pub max_value: f64,
}

/// Errors that can occur when summarizing a dataset
#[derive(Debug, thiserror::Error)]
pub enum SummarizeDatasetError {
    #[error("Dataset '{0}' not found")]
    NotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, sqlx::FromRow)]
struct AggregateRow {
    total_records: i64,
    total_value: Option<f64>,
    avg_value: Option<f64>,
    min_value: Option<f64>,
    max_value: Option<f64>,
    min_date: Option<NaiveDate>,
    max_date: Option<NaiveDate>,
    category_count: i64,
}

/// Handles the summarize dataset query
///
/// A single statement joining the dataset row, so a concurrent delete can
/// never be observed as an empty summary: either the dataset row is there
/// and the aggregates are consistent with it, or the result is `NotFound`.
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    dataset_id: Uuid,
) -> Result<SummaryStatsResponse, SummarizeDatasetError> {
    let row: Option<AggregateRow> = sqlx::query_as(
        r#"
        SELECT
            COUNT(r.id) AS total_records,
            SUM(r.value) AS total_value,
            AVG(r.value) AS avg_value,
            MIN(r.value) AS min_value,
            MAX(r.value) AS max_value,
            MIN(r.date) AS min_date,
            MAX(r.date) AS max_date,
            COUNT(DISTINCT r.category) AS category_count
        FROM datasets d
        LEFT JOIN records r ON r.dataset_id = d.id
        WHERE d.id = $1
        GROUP BY d.id
        "#,
    )
    .bind(dataset_id)
    .fetch_optional(&pool)
    .await?;

    let row = row.ok_or(SummarizeDatasetError::NotFound(dataset_id))?;

    tracing::debug!(
        dataset_id = %dataset_id,
        total_records = row.total_records,
        "summary statistics computed"
    );

    Ok(SummaryStatsResponse {
        dataset_id,
        total_records: row.total_records,
        date_range: DateRange {
            min: row.min_date,
            max: row.max_date,
        },
        category_count: row.category_count,
        total_value: row.total_value.unwrap_or(0.0),
        avg_value: row.avg_value.unwrap_or(0.0),
        min_value: row.min_value.unwrap_or(0.0),
        max_value: row.max_value.unwrap_or(0.0),
    })
}
