//! HTTP handlers for batch processing endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::batch::{BatchService, CompleteBatchInput, CreateBatchInput};
use crate::AppState;
use shared::ProcessingBatch;

/// Start a processing batch
pub async fn create_batch(
    State(state): State<AppState>,
    Json(input): Json<CreateBatchInput>,
) -> AppResult<Json<ProcessingBatch>> {
    let service = BatchService::new(state.db);
    let batch = service.create_batch(input).await?;
    Ok(Json(batch))
}

/// Complete a processing batch
pub async fn complete_batch(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
    Json(input): Json<CompleteBatchInput>,
) -> AppResult<Json<ProcessingBatch>> {
    let service = BatchService::new(state.db);
    let batch = service.complete_batch(batch_id, input).await?;
    Ok(Json(batch))
}

/// Get a batch by ID
pub async fn get_batch(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
) -> AppResult<Json<ProcessingBatch>> {
    let service = BatchService::new(state.db);
    let batch = service.get_batch(batch_id).await?;
    Ok(Json(batch))
}

/// List all batches
pub async fn list_batches(State(state): State<AppState>) -> AppResult<Json<Vec<ProcessingBatch>>> {
    let service = BatchService::new(state.db);
    let batches = service.list_batches().await?;
    Ok(Json(batches))
}
