//! CSV ingestion command
//!
//! Parses an uploaded CSV, validates its structure, and persists the
//! dataset row plus all records inside one transaction. A failure at any
//! stage leaves no trace in the store.

use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::features::datasets::types::{DatasetResponse, DatasetRow, DATASET_COLUMNS};
use crate::features::shared::validation::{
    sanitize_filename, validate_upload_filename, FilenameValidationError,
};
use crate::ingest::{self, parser, CsvValidationError, NewRecord};

/// Records are inserted in batches to keep bind-parameter counts bounded.
const INSERT_CHUNK_SIZE: usize = 1000;

/// Maximum length for uploaded filenames
const MAX_FILENAME_LENGTH: usize = 255;

/// Command to ingest an uploaded CSV file as a new dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestCsvCommand {
    pub filename: String,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(skip)]
    pub content: Vec<u8>,
}

/// Errors that can occur during CSV ingestion
#[derive(Debug, thiserror::Error)]
pub enum IngestCsvError {
    #[error("No file part")]
    FileRequired,

    #[error("No selected file")]
    FilenameRequired,

    #[error("Filename exceeds maximum length of {0} characters")]
    FilenameLength(usize),

    #[error("Invalid file format. Only .csv files are supported.")]
    InvalidExtension,

    #[error("Failed to parse CSV: {0}")]
    Parse(String),

    #[error(transparent)]
    Validation(#[from] CsvValidationError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IngestCsvCommand {
    /// Validates the command before any parsing work
    pub fn validate(&self) -> Result<(), IngestCsvError> {
        if self.content.is_empty() {
            return Err(IngestCsvError::FileRequired);
        }
        validate_upload_filename(&self.filename, MAX_FILENAME_LENGTH).map_err(|e| match e {
            FilenameValidationError::Required => IngestCsvError::FilenameRequired,
            FilenameValidationError::TooLong { max_length } => {
                IngestCsvError::FilenameLength(max_length)
            },
            FilenameValidationError::NotCsv => IngestCsvError::InvalidExtension,
        })
    }
}

/// Handles the CSV ingestion command
#[tracing::instrument(skip(pool, command), fields(filename = %command.filename))]
pub async fn handle(
    pool: PgPool,
    command: IngestCsvCommand,
) -> Result<DatasetResponse, IngestCsvError> {
    command.validate()?;

    let table =
        parser::parse(&command.content).map_err(|e| IngestCsvError::Parse(e.to_string()))?;
    ingest::validate_structure(&table)?;
    let records = ingest::transform(&table);

    let filename = sanitize_filename(&command.filename);
    // The display name falls back to the filename exactly as the client
    // sent it; only the stored filename is sanitized.
    let name = command
        .name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| command.filename.clone());

    let mut tx = pool.begin().await?;

    let dataset: DatasetRow = sqlx::query_as(&format!(
        r#"
        INSERT INTO datasets (name, description, filename, row_count, column_names)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {}
        "#,
        DATASET_COLUMNS
    ))
    .bind(&name)
    .bind(&command.description)
    .bind(&filename)
    .bind(records.len() as i32)
    .bind(sqlx::types::Json(&table.columns))
    .fetch_one(&mut *tx)
    .await?;

    for chunk in records.chunks(INSERT_CHUNK_SIZE) {
        insert_records(&mut tx, dataset.id, chunk).await?;
    }

    tx.commit().await?;

    tracing::info!(
        dataset_id = %dataset.id,
        rows = records.len(),
        columns = table.columns.len(),
        "dataset ingested"
    );

    Ok(DatasetResponse::from(dataset))
}

async fn insert_records(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    dataset_id: uuid::Uuid,
    records: &[NewRecord],
) -> Result<(), sqlx::Error> {
    if records.is_empty() {
        return Ok(());
    }

    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("INSERT INTO records (dataset_id, date, category, value, metadata) ");
    builder.push_values(records, |mut b, record| {
        b.push_bind(dataset_id)
            .push_bind(record.date)
            .push_bind(&record.category)
            .push_bind(record.value)
            .push_bind(sqlx::types::Json(&record.metadata));
    });
    builder.build().execute(&mut **tx).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::count_records;

    fn command(filename: &str, content: &[u8]) -> IngestCsvCommand {
        IngestCsvCommand {
            filename: filename.to_string(),
            name: None,
            description: None,
            content: content.to_vec(),
        }
    }

    #[test]
    fn test_validate_empty_content() {
        let cmd = command("data.csv", b"");
        assert!(matches!(cmd.validate(), Err(IngestCsvError::FileRequired)));
    }

    #[test]
    fn test_validate_empty_filename() {
        let cmd = command("", b"category,value\nA,1\n");
        assert!(matches!(
            cmd.validate(),
            Err(IngestCsvError::FilenameRequired)
        ));
    }

    #[test]
    fn test_validate_wrong_extension() {
        let cmd = command("data.xlsx", b"category,value\nA,1\n");
        assert!(matches!(
            cmd.validate(),
            Err(IngestCsvError::InvalidExtension)
        ));
    }

    #[test]
    fn test_validate_long_filename() {
        let long = format!("{}.csv", "a".repeat(300));
        let cmd = command(&long, b"category,value\nA,1\n");
        assert!(matches!(
            cmd.validate(),
            Err(IngestCsvError::FilenameLength(_))
        ));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_ingest_persists_dataset_and_records(pool: PgPool) -> sqlx::Result<()> {
        let csv = b"date,category,value,region\n2024-01-15,Sales,1000.50,North\n2024-01-20,Marketing,750,South\n";
        let cmd = command("report.csv", csv);

        let dataset = handle(pool.clone(), cmd).await.unwrap();
        assert_eq!(dataset.name, "report.csv");
        assert_eq!(dataset.filename, "report.csv");
        assert_eq!(dataset.row_count, 2);
        assert_eq!(
            dataset.column_names,
            vec!["date", "category", "value", "region"]
        );

        assert_eq!(count_records(&pool, dataset.id).await?, 2);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_ingest_uses_provided_name(pool: PgPool) -> sqlx::Result<()> {
        let mut cmd = command("raw_export.csv", b"category,value\nA,1\n");
        cmd.name = Some("Q1 Sales".to_string());
        cmd.description = Some("First quarter".to_string());

        let dataset = handle(pool, cmd).await.unwrap();
        assert_eq!(dataset.name, "Q1 Sales");
        assert_eq!(dataset.description.as_deref(), Some("First quarter"));
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_ingest_blank_name_falls_back_to_filename(pool: PgPool) -> sqlx::Result<()> {
        let mut cmd = command("export.csv", b"category,value\nA,1\n");
        cmd.name = Some("   ".to_string());

        let dataset = handle(pool, cmd).await.unwrap();
        assert_eq!(dataset.name, "export.csv");
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_ingest_rejects_headers_only(pool: PgPool) -> sqlx::Result<()> {
        let cmd = command("empty.csv", b"category,value\n");

        let result = handle(pool.clone(), cmd).await;
        assert!(matches!(
            result,
            Err(IngestCsvError::Validation(CsvValidationError::Empty))
        ));

        // Nothing was persisted.
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM datasets")
            .fetch_one(&pool)
            .await?;
        assert_eq!(total, 0);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_ingest_rejects_missing_required_columns(pool: PgPool) -> sqlx::Result<()> {
        let cmd = command("bad.csv", b"date,amount\n2024-01-01,5\n");

        let result = handle(pool.clone(), cmd).await;
        assert!(matches!(
            result,
            Err(IngestCsvError::Validation(
                CsvValidationError::MissingColumns(_)
            ))
        ));

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM datasets")
            .fetch_one(&pool)
            .await?;
        assert_eq!(total, 0);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_ingest_sanitizes_path_components(pool: PgPool) -> sqlx::Result<()> {
        let cmd = command("../../etc/my data.csv", b"category,value\nA,1\n");

        let dataset = handle(pool, cmd).await.unwrap();
        assert_eq!(dataset.filename, "my_data.csv");
        // The display name keeps the filename as the client sent it.
        assert_eq!(dataset.name, "../../etc/my data.csv");
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_ingest_then_aggregate_end_to_end(pool: PgPool) -> sqlx::Result<()> {
        use crate::features::datasets::queries::{chart_data, summary};

        let csv = b"date,category,value\n\
            2024-01-15,Electronics,1000\n\
            2024-01-20,Clothing,500\n\
            2024-02-05,Electronics,800\n\
            2024-02-10,Groceries,200\n\
            2024-02-15,Clothing,600\n";
        let dataset = handle(pool.clone(), command("sales.csv", csv)).await.unwrap();
        assert_eq!(dataset.row_count, 5);

        let stats = summary::handle(pool.clone(), dataset.id).await.unwrap();
        assert_eq!(stats.total_records, 5);
        assert_eq!(stats.category_count, 3);
        assert_eq!(stats.total_value, 3100.0);
        assert_eq!(stats.avg_value, 620.0);
        assert_eq!(stats.min_value, 200.0);
        assert_eq!(stats.max_value, 1000.0);
        assert_eq!(
            stats.date_range.min,
            chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(
            stats.date_range.max,
            chrono::NaiveDate::from_ymd_opt(2024, 2, 15)
        );

        let bundle = chart_data::handle(pool, dataset.id).await.unwrap();
        let totals: Vec<(&str, f64)> = bundle
            .bar_chart
            .iter()
            .map(|t| (t.category.as_str(), t.value))
            .collect();
        assert_eq!(
            totals,
            vec![
                ("Clothing", 1100.0),
                ("Electronics", 1800.0),
                ("Groceries", 200.0)
            ]
        );

        let months: Vec<(&str, f64)> = bundle
            .line_chart
            .iter()
            .map(|p| (p.date.as_str(), p.value))
            .collect();
        assert_eq!(months, vec![("2024-01", 1500.0), ("2024-02", 1600.0)]);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_ingest_defaults_applied_per_record(pool: PgPool) -> sqlx::Result<()> {
        let csv = b"category,value\n,12\nSales,not-a-number\n";
        let cmd = command("defaults.csv", csv);

        let dataset = handle(pool.clone(), cmd).await.unwrap();
        assert_eq!(dataset.row_count, 2);

        let rows: Vec<(String, f64)> = sqlx::query_as(
            "SELECT category, value FROM records WHERE dataset_id = $1 ORDER BY category",
        )
        .bind(dataset.id)
        .fetch_all(&pool)
        .await?;
        assert_eq!(rows[0], ("Sales".to_string(), 0.0));
        assert_eq!(rows[1], ("Uncategorized".to_string(), 12.0));
        Ok(())
    }
}
