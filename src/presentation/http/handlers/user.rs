//! User Handlers
//!
//! `/user/` manages accounts under the superuser-or-self rule.
//! `/current-user/` is a read-only view that only ever shows the caller.

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::request::{CreateUserRequest, UpdateUserRequest};
use crate::application::services::UserService;
use crate::domain::{Resource, User};
use crate::presentation::http::extractors::{RowId, ValidJson};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<User>>, AppError> {
    let users = state
        .user_service()
        .list(&auth.principal(), Resource::User)
        .await?;
    Ok(Json(users))
}

pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(body): ValidJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = state.user_service().create(&auth.principal(), body).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
) -> Result<Json<User>, AppError> {
    let user = state
        .user_service()
        .get(&auth.principal(), Resource::User, id)
        .await?;
    Ok(Json(user))
}

/// PUT: every field required on create must be sent again.
pub async fn replace_user(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
    ValidJson(body): ValidJson<CreateUserRequest>,
) -> Result<Json<User>, AppError> {
    let user = state
        .user_service()
        .update(&auth.principal(), id, body.into())
        .await?;
    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
    ValidJson(body): ValidJson<UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    let user = state
        .user_service()
        .update(&auth.principal(), id, body)
        .await?;
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
) -> Result<StatusCode, AppError> {
    state.user_service().delete(&auth.principal(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<User>>, AppError> {
    let users = state
        .user_service()
        .list(&auth.principal(), Resource::CurrentUser)
        .await?;
    Ok(Json(users))
}

pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    RowId(id): RowId,
) -> Result<Json<User>, AppError> {
    let user = state
        .user_service()
        .get(&auth.principal(), Resource::CurrentUser, id)
        .await?;
    Ok(Json(user))
}
