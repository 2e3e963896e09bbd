//! Dataset routes
//!
//! Read and delete endpoints for the dataset registry, plus the derived
//! summary and chart projections.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::response::MessageResponse;
use crate::error::AppError;

use super::commands::{delete::handle as handle_delete, DeleteDatasetCommand, DeleteDatasetError};
use super::queries::{
    chart_data::handle as handle_chart_data, get::handle as handle_get,
    list::handle as handle_list, summary::handle as handle_summary, ChartDataError,
    GetDatasetError, ListDatasetsError, SummarizeDatasetError,
};

/// Create dataset routes
pub fn datasets_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(list_datasets))
        .route("/:id", get(get_dataset).delete(delete_dataset))
        .route("/:id/summary", get(dataset_summary))
        .route("/:id/chart-data", get(dataset_chart_data))
}

/// List all datasets, newest upload first
///
/// GET /datasets
async fn list_datasets(State(db): State<PgPool>) -> Result<Response, AppError> {
    let response = handle_list(db).await?;
    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Get a single dataset's metadata
///
/// GET /datasets/:id
async fn get_dataset(
    State(db): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let dataset = handle_get(db, id).await?;
    Ok((StatusCode::OK, Json(dataset)).into_response())
}

/// Delete a dataset and all of its records
///
/// DELETE /datasets/:id
async fn delete_dataset(
    State(db): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    handle_delete(db, DeleteDatasetCommand { id }).await?;
    Ok((
        StatusCode::OK,
        Json(MessageResponse::new("Dataset deleted successfully")),
    )
        .into_response())
}

/// Summary statistics for a dataset
///
/// GET /datasets/:id/summary
async fn dataset_summary(
    State(db): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let stats = handle_summary(db, id).await?;
    Ok((StatusCode::OK, Json(stats)).into_response())
}

/// Chart projections (bar, line, pie) for a dataset
///
/// GET /datasets/:id/chart-data
async fn dataset_chart_data(
    State(db): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let bundle = handle_chart_data(db, id).await?;
    Ok((StatusCode::OK, Json(bundle)).into_response())
}

impl From<ListDatasetsError> for AppError {
    fn from(err: ListDatasetsError) -> Self {
        match err {
            ListDatasetsError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<GetDatasetError> for AppError {
    fn from(err: GetDatasetError) -> Self {
        match err {
            GetDatasetError::NotFound(id) => AppError::not_found("Dataset", id),
            GetDatasetError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<DeleteDatasetError> for AppError {
    fn from(err: DeleteDatasetError) -> Self {
        match err {
            DeleteDatasetError::NotFound(id) => AppError::not_found("Dataset", id),
            DeleteDatasetError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<SummarizeDatasetError> for AppError {
    fn from(err: SummarizeDatasetError) -> Self {
        match err {
            SummarizeDatasetError::NotFound(id) => AppError::not_found("Dataset", id),
            SummarizeDatasetError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<ChartDataError> for AppError {
    fn from(err: ChartDataError) -> Self {
        match err {
            ChartDataError::NotFound(id) => AppError::not_found("Dataset", id),
            ChartDataError::Database(e) => AppError::Database(e),
        }
    }
}
