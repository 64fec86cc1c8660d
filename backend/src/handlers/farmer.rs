//! HTTP handlers for farmer registry endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::farmer::{CreateFarmerInput, FarmerService, UpdateFarmerInput};
use crate::AppState;
use shared::{Farmer, PaginatedResponse, Pagination};

/// Register a farmer
pub async fn create_farmer(
    State(state): State<AppState>,
    Json(input): Json<CreateFarmerInput>,
) -> AppResult<Json<Farmer>> {
    let service = FarmerService::new(state.db);
    let farmer = service.create_farmer(input).await?;
    Ok(Json(farmer))
}

/// Get a farmer by ID
pub async fn get_farmer(
    State(state): State<AppState>,
    Path(farmer_id): Path<Uuid>,
) -> AppResult<Json<Farmer>> {
    let service = FarmerService::new(state.db);
    let farmer = service.get_farmer(farmer_id).await?;
    Ok(Json(farmer))
}

/// List farmers, paginated
pub async fn list_farmers(
    State(state): State<AppState>,
    pagination: Option<Query<Pagination>>,
) -> AppResult<Json<PaginatedResponse<Farmer>>> {
    let pagination = pagination.map(|Query(p)| p).unwrap_or_default();
    let service = FarmerService::new(state.db);
    let farmers = service.list_farmers(pagination).await?;
    Ok(Json(farmers))
}

/// Update a farmer
pub async fn update_farmer(
    State(state): State<AppState>,
    Path(farmer_id): Path<Uuid>,
    Json(input): Json<UpdateFarmerInput>,
) -> AppResult<Json<Farmer>> {
    let service = FarmerService::new(state.db);
    let farmer = service.update_farmer(farmer_id, input).await?;
    Ok(Json(farmer))
}
