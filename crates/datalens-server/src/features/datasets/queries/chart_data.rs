//! Chart projection query
//!
//! Three visualization-ready projections over a dataset's records:
//! categorical totals (bar and pie) and a monthly time series (line).
//! The monthly series is an explicit grouping pass over (year, month)
//! rather than a date-library resample, so month boundaries are exact
//! calendar truncation.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Summed value for one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub value: f64,
}

/// Summed value for one calendar month, labeled `YYYY-MM`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub date: String,
    pub value: f64,
}

/// The three chart projections served together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartBundleResponse {
    pub bar_chart: Vec<CategoryTotal>,
    pub line_chart: Vec<MonthlyPoint>,
    pub pie_chart: Vec<CategoryTotal>,
}

/// Errors that can occur when building chart data
#[derive(Debug, thiserror::Error)]
pub enum ChartDataError {
    #[error("Dataset '{0}' not found")]
    NotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, sqlx::FromRow)]
struct RecordRow {
    category: Option<String>,
    date: Option<NaiveDate>,
    value: Option<f64>,
}

/// Handles the chart data query
///
/// Records are fetched in a single statement joining the dataset row, so a
/// concurrent delete is seen as `NotFound` rather than as empty charts, and
/// all three projections derive from the same snapshot. A dataset with no
/// records surfaces as one join placeholder row with null record columns.
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    dataset_id: Uuid,
) -> Result<ChartBundleResponse, ChartDataError> {
    let rows: Vec<RecordRow> = sqlx::query_as(
        r#"
        SELECT r.category, r.date, r.value
        FROM datasets d
        LEFT JOIN records r ON r.dataset_id = d.id
        WHERE d.id = $1
        "#,
    )
    .bind(dataset_id)
    .fetch_all(&pool)
    .await?;

    if rows.is_empty() {
        return Err(ChartDataError::NotFound(dataset_id));
    }

    // BTreeMap keeps the categorical totals sorted for deterministic output.
    let mut category_totals: BTreeMap<String, f64> = BTreeMap::new();
    let mut dated_values: Vec<(NaiveDate, f64)> = Vec::new();
    for row in rows {
        let Some(category) = row.category else {
            continue;
        };
        let value = row.value.unwrap_or(0.0);
        *category_totals.entry(category).or_insert(0.0) += value;
        if let Some(date) = row.date {
            dated_values.push((date, value));
        }
    }

    let bar_chart: Vec<CategoryTotal> = category_totals
        .into_iter()
        .map(|(category, value)| CategoryTotal { category, value })
        .collect();

    let line_chart = bucket_by_month(dated_values);

    tracing::debug!(
        dataset_id = %dataset_id,
        categories = bar_chart.len(),
        months = line_chart.len(),
        "chart projections computed"
    );

    // The pie chart is the same categorical totals under a different key.
    let pie_chart = bar_chart.clone();

    Ok(ChartBundleResponse {
        bar_chart,
        line_chart,
        pie_chart,
    })
}

/// Bucket dated values into calendar months, summing per month.
///
/// Output is ascending by month; months with no contributing records
/// produce no entry.
fn bucket_by_month(rows: impl IntoIterator<Item = (NaiveDate, f64)>) -> Vec<MonthlyPoint> {
    let mut buckets: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for (date, value) in rows {
        *buckets.entry((date.year(), date.month())).or_insert(0.0) += value;
    }

    buckets
        .into_iter()
        .map(|((year, month), value)| MonthlyPoint {
            date: format!("{:04}-{:02}", year, month),
            value,
        })
        .collect()
}
