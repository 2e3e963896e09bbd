//! Upload routes
//!
//! Accepts a multipart CSV upload and hands the bytes to the ingestion
//! command. Field order in the multipart body is not significant.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use sqlx::PgPool;

use crate::error::AppError;

use super::commands::{ingest::handle as handle_ingest, IngestCsvCommand, IngestCsvError};

/// Create upload routes
pub fn upload_routes() -> Router<PgPool> {
    Router::new().route("/", post(upload_csv))
}

/// Upload a CSV file as a new dataset
///
/// POST /upload (multipart/form-data: file, name?, description?)
async fn upload_csv(
    State(db): State<PgPool>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut filename: Option<String> = None;
    let mut content: Option<Vec<u8>> = None;
    let mut name: Option<String> = None;
    let mut description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                filename = field.file_name().map(str::to_owned);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read file: {e}")))?;
                content = Some(bytes.to_vec());
            },
            Some("name") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read field: {e}")))?;
                name = Some(text);
            },
            Some("description") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read field: {e}")))?;
                description = Some(text);
            },
            _ => {},
        }
    }

    let content = content.ok_or_else(|| AppError::validation("No file part"))?;

    let command = IngestCsvCommand {
        filename: filename.unwrap_or_default(),
        name,
        description,
        content,
    };

    let dataset = handle_ingest(db, command).await?;
    Ok((StatusCode::CREATED, Json(dataset)).into_response())
}

impl From<IngestCsvError> for AppError {
    fn from(err: IngestCsvError) -> Self {
        match err {
            IngestCsvError::Database(e) => AppError::Database(e),
            other => AppError::validation(other.to_string()),
        }
    }
}
