//! HTTP handlers for point-of-sale endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::sale::{CreateSaleInput, SaleService};
use crate::AppState;
use shared::{SaleDetail, SaleTransaction};

/// Record a sale
pub async fn create_sale(
    State(state): State<AppState>,
    Json(input): Json<CreateSaleInput>,
) -> AppResult<Json<SaleDetail>> {
    let service = SaleService::new(state.db);
    let sale = service.create_sale(input).await?;
    Ok(Json(sale))
}

/// Get a sale with its items
pub async fn get_sale(
    State(state): State<AppState>,
    Path(sale_id): Path<Uuid>,
) -> AppResult<Json<SaleDetail>> {
    let service = SaleService::new(state.db);
    let sale = service.get_sale(sale_id).await?;
    Ok(Json(sale))
}

/// List all sales
pub async fn list_sales(State(state): State<AppState>) -> AppResult<Json<Vec<SaleTransaction>>> {
    let service = SaleService::new(state.db);
    let sales = service.list_sales().await?;
    Ok(Json(sales))
}
