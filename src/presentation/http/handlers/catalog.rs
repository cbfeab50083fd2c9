//! Service Catalogue Handlers
//!
//! `/service-type/` and `/sub-service/`. Open to every authenticated user.

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::request::{
    CreateServiceTypeRequest, CreateSubServiceRequest, UpdateServiceTypeRequest,
    UpdateSubServiceRequest,
};
use crate::application::services::CatalogService;
use crate::domain::{ServiceType, SubService};
use crate::presentation::http::extractors::{RowId, ValidJson};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

pub async fn list_service_types(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<ServiceType>>, AppError> {
    let rows = state
        .catalog_service()
        .list_service_types(&auth.principal())
        .await?;
    Ok(Json(rows))
}

pub async fn create_service_type(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(body): ValidJson<CreateServiceTypeRequest>,
) -> Result<(StatusCode, Json<ServiceType>), AppError> {
    let row = state
        .catalog_service()
        .create_service_type(&auth.principal(), body)
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn get_service_type(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
) -> Result<Json<ServiceType>, AppError> {
    let row = state
        .catalog_service()
        .get_service_type(&auth.principal(), id)
        .await?;
    Ok(Json(row))
}

pub async fn replace_service_type(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
    ValidJson(body): ValidJson<CreateServiceTypeRequest>,
) -> Result<Json<ServiceType>, AppError> {
    let row = state
        .catalog_service()
        .update_service_type(&auth.principal(), id, body.into())
        .await?;
    Ok(Json(row))
}

pub async fn update_service_type(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
    ValidJson(body): ValidJson<UpdateServiceTypeRequest>,
) -> Result<Json<ServiceType>, AppError> {
    let row = state
        .catalog_service()
        .update_service_type(&auth.principal(), id, body)
        .await?;
    Ok(Json(row))
}

pub async fn delete_service_type(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
) -> Result<StatusCode, AppError> {
    state
        .catalog_service()
        .delete_service_type(&auth.principal(), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_sub_services(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<SubService>>, AppError> {
    let rows = state
        .catalog_service()
        .list_sub_services(&auth.principal())
        .await?;
    Ok(Json(rows))
}

pub async fn create_sub_service(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(body): ValidJson<CreateSubServiceRequest>,
) -> Result<(StatusCode, Json<SubService>), AppError> {
    let row = state
        .catalog_service()
        .create_sub_service(&auth.principal(), body)
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn get_sub_service(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
) -> Result<Json<SubService>, AppError> {
    let row = state
        .catalog_service()
        .get_sub_service(&auth.principal(), id)
        .await?;
    Ok(Json(row))
}

pub async fn replace_sub_service(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
    ValidJson(body): ValidJson<CreateSubServiceRequest>,
) -> Result<Json<SubService>, AppError> {
    let row = state
        .catalog_service()
        .update_sub_service(&auth.principal(), id, body.into())
        .await?;
    Ok(Json(row))
}

pub async fn update_sub_service(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
    ValidJson(body): ValidJson<UpdateSubServiceRequest>,
) -> Result<Json<SubService>, AppError> {
    let row = state
        .catalog_service()
        .update_sub_service(&auth.principal(), id, body)
        .await?;
    Ok(Json(row))
}

pub async fn delete_sub_service(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
) -> Result<StatusCode, AppError> {
    state
        .catalog_service()
        .delete_sub_service(&auth.principal(), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
