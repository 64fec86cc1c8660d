//! HTTP handlers for shelter endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::shelter::{CreateShelterInput, ShelterService};
use crate::AppState;
use shared::Shelter;

/// Create a shelter
pub async fn create_shelter(
    State(state): State<AppState>,
    Json(input): Json<CreateShelterInput>,
) -> AppResult<Json<Shelter>> {
    let service = ShelterService::new(state.db);
    let shelter = service.create_shelter(input).await?;
    Ok(Json(shelter))
}

/// Get a shelter by ID
pub async fn get_shelter(
    State(state): State<AppState>,
    Path(shelter_id): Path<Uuid>,
) -> AppResult<Json<Shelter>> {
    let service = ShelterService::new(state.db);
    let shelter = service.get_shelter(shelter_id).await?;
    Ok(Json(shelter))
}

/// List all shelters
pub async fn list_shelters(State(state): State<AppState>) -> AppResult<Json<Vec<Shelter>>> {
    let service = ShelterService::new(state.db);
    let shelters = service.list_shelters().await?;
    Ok(Json(shelters))
}
