//! HTTP handlers for inventory endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::AppResult;
use crate::services::inventory::{InventoryService, MovementFilter, RecordAdjustmentInput};
use crate::AppState;
use shared::{InventorySummary, StockBalance, StockMovement};

/// List stock movements
pub async fn list_movements(
    State(state): State<AppState>,
    Query(filter): Query<MovementFilter>,
) -> AppResult<Json<Vec<StockMovement>>> {
    let service = InventoryService::new(state.db);
    let movements = service.list_movements(filter).await?;
    Ok(Json(movements))
}

/// Record a manual stock adjustment
pub async fn record_adjustment(
    State(state): State<AppState>,
    Json(input): Json<RecordAdjustmentInput>,
) -> AppResult<Json<StockMovement>> {
    let service = InventoryService::new(state.db);
    let movement = service.record_adjustment(input).await?;
    Ok(Json(movement))
}

/// Get stock balances per product and shelter
pub async fn get_balances(State(state): State<AppState>) -> AppResult<Json<Vec<StockBalance>>> {
    let service = InventoryService::new(state.db);
    let balances = service.get_balances().await?;
    Ok(Json(balances))
}

/// Get the inventory summary
pub async fn get_inventory_summary(
    State(state): State<AppState>,
) -> AppResult<Json<InventorySummary>> {
    let service = InventoryService::new(state.db);
    let summary = service.get_summary().await?;
    Ok(Json(summary))
}
