//! Test helpers for database tests
//!
//! Seeds datasets and records without going through the upload pipeline.

use chrono::NaiveDate;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// Insert a dataset with the given name and column list, returning its id.
pub async fn seed_dataset(pool: &PgPool, name: &str, columns: &[&str]) -> sqlx::Result<Uuid> {
    let columns: Vec<String> = columns.iter().map(|s| s.to_string()).collect();
    sqlx::query_scalar(
        r#"
        INSERT INTO datasets (name, filename, row_count, column_names)
        VALUES ($1, $2, 0, $3)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(format!("{}.csv", name))
    .bind(Json(columns))
    .fetch_one(pool)
    .await
}

/// Insert a single record for a dataset.
pub async fn seed_record(
    pool: &PgPool,
    dataset_id: Uuid,
    date: Option<NaiveDate>,
    category: &str,
    value: f64,
) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO records (dataset_id, date, category, value, metadata)
        VALUES ($1, $2, $3, $4, '{}'::jsonb)
        "#,
    )
    .bind(dataset_id)
    .bind(date)
    .bind(category)
    .bind(value)
    .execute(pool)
    .await?;
    Ok(())
}

/// Shorthand for building a `NaiveDate` in tests.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Count the records currently persisted for a dataset.
pub async fn count_records(pool: &PgPool, dataset_id: Uuid) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM records WHERE dataset_id = $1")
        .bind(dataset_id)
        .fetch_one(pool)
        .await
}
