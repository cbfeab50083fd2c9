//! Vehicle Service Record Handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::request::{
    CreateVehicleServiceRequest, UpdateVehicleServiceRequest,
};
use crate::application::services::MaintenanceService;
use crate::domain::VehicleService;
use crate::presentation::http::extractors::{RowId, ValidJson};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

pub async fn list_records(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<VehicleService>>, AppError> {
    let records = state.maintenance_service().list(&auth.principal()).await?;
    Ok(Json(records))
}

pub async fn create_record(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(body): ValidJson<CreateVehicleServiceRequest>,
) -> Result<(StatusCode, Json<VehicleService>), AppError> {
    let record = state
        .maintenance_service()
        .create(&auth.principal(), body)
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_record(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
) -> Result<Json<VehicleService>, AppError> {
    let record = state
        .maintenance_service()
        .get(&auth.principal(), id)
        .await?;
    Ok(Json(record))
}

pub async fn replace_record(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
    ValidJson(body): ValidJson<CreateVehicleServiceRequest>,
) -> Result<Json<VehicleService>, AppError> {
    let record = state
        .maintenance_service()
        .update(&auth.principal(), id, body.into())
        .await?;
    Ok(Json(record))
}

pub async fn update_record(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
    ValidJson(body): ValidJson<UpdateVehicleServiceRequest>,
) -> Result<Json<VehicleService>, AppError> {
    let record = state
        .maintenance_service()
        .update(&auth.principal(), id, body)
        .await?;
    Ok(Json(record))
}

pub async fn delete_record(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
) -> Result<StatusCode, AppError> {
    state
        .maintenance_service()
        .delete(&auth.principal(), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
