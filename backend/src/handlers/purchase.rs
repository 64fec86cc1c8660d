//! HTTP handlers for purchase intake endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::purchase::{
    CreatePurchaseInput, PreviewPurchaseInput, PurchasePreview, PurchaseService,
};
use crate::AppState;
use shared::{DateRange, PurchaseTransaction};

/// Query parameters for listing purchases
#[derive(Debug, Default, Deserialize)]
pub struct PurchaseListQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Preview the grading result for the current intake form state
pub async fn preview_purchase(
    State(state): State<AppState>,
    Json(input): Json<PreviewPurchaseInput>,
) -> AppResult<Json<PurchasePreview>> {
    let service = PurchaseService::new(state.db);
    let preview = service.preview_purchase(input).await?;
    Ok(Json(preview))
}

/// Record a purchase transaction
pub async fn create_purchase(
    State(state): State<AppState>,
    Json(input): Json<CreatePurchaseInput>,
) -> AppResult<Json<PurchaseTransaction>> {
    let service = PurchaseService::new(state.db);
    let purchase = service.create_purchase(input).await?;
    Ok(Json(purchase))
}

/// Get a purchase by ID
pub async fn get_purchase(
    State(state): State<AppState>,
    Path(purchase_id): Path<Uuid>,
) -> AppResult<Json<PurchaseTransaction>> {
    let service = PurchaseService::new(state.db);
    let purchase = service.get_purchase(purchase_id).await?;
    Ok(Json(purchase))
}

/// List purchases, optionally filtered by purchase date
pub async fn list_purchases(
    State(state): State<AppState>,
    Query(query): Query<PurchaseListQuery>,
) -> AppResult<Json<Vec<PurchaseTransaction>>> {
    let range = match (query.start, query.end) {
        (Some(start), Some(end)) => Some(DateRange { start, end }),
        _ => None,
    };

    let service = PurchaseService::new(state.db);
    let purchases = service.list_purchases(range).await?;
    Ok(Json(purchases))
}
