//! Vehicle and Vehicle Part Handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::request::{
    CreateVehiclePartRequest, CreateVehicleRequest, UpdateVehiclePartRequest, UpdateVehicleRequest,
};
use crate::application::services::FleetService;
use crate::domain::{Vehicle, VehiclePart};
use crate::presentation::http::extractors::{RowId, ValidJson};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

pub async fn list_vehicles(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let vehicles = state
        .fleet_service()
        .list_vehicles(&auth.principal())
        .await?;
    Ok(Json(vehicles))
}

pub async fn create_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(body): ValidJson<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    let vehicle = state
        .fleet_service()
        .create_vehicle(&auth.principal(), body)
        .await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

pub async fn get_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = state
        .fleet_service()
        .get_vehicle(&auth.principal(), id)
        .await?;
    Ok(Json(vehicle))
}

pub async fn replace_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
    ValidJson(body): ValidJson<CreateVehicleRequest>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = state
        .fleet_service()
        .update_vehicle(&auth.principal(), id, body.into())
        .await?;
    Ok(Json(vehicle))
}

pub async fn update_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
    ValidJson(body): ValidJson<UpdateVehicleRequest>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = state
        .fleet_service()
        .update_vehicle(&auth.principal(), id, body)
        .await?;
    Ok(Json(vehicle))
}

pub async fn delete_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
) -> Result<StatusCode, AppError> {
    state
        .fleet_service()
        .delete_vehicle(&auth.principal(), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_parts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<VehiclePart>>, AppError> {
    let parts = state.fleet_service().list_parts(&auth.principal()).await?;
    Ok(Json(parts))
}

pub async fn create_part(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(body): ValidJson<CreateVehiclePartRequest>,
) -> Result<(StatusCode, Json<VehiclePart>), AppError> {
    let part = state
        .fleet_service()
        .create_part(&auth.principal(), body)
        .await?;
    Ok((StatusCode::CREATED, Json(part)))
}

pub async fn get_part(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
) -> Result<Json<VehiclePart>, AppError> {
    let part = state.fleet_service().get_part(&auth.principal(), id).await?;
    Ok(Json(part))
}

pub async fn replace_part(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
    ValidJson(body): ValidJson<CreateVehiclePartRequest>,
) -> Result<Json<VehiclePart>, AppError> {
    let part = state
        .fleet_service()
        .update_part(&auth.principal(), id, body.into())
        .await?;
    Ok(Json(part))
}

pub async fn update_part(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
    ValidJson(body): ValidJson<UpdateVehiclePartRequest>,
) -> Result<Json<VehiclePart>, AppError> {
    let part = state
        .fleet_service()
        .update_part(&auth.principal(), id, body)
        .await?;
    Ok(Json(part))
}

pub async fn delete_part(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
) -> Result<StatusCode, AppError> {
    state
        .fleet_service()
        .delete_part(&auth.principal(), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
