//! Token Handlers

use axum::{extract::State, Json};

use crate::application::dto::request::{LoginRequest, RefreshTokenRequest};
use crate::application::dto::response::{AccessTokenResponse, TokenPairResponse};
use crate::application::services::AuthService;
use crate::presentation::http::extractors::ValidJson;
use crate::shared::error::AppError;
use crate::shared::validation::required;
use crate::startup::AppState;

/// Exchange credentials for an access/refresh pair
pub async fn obtain_token_pair(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<LoginRequest>,
) -> Result<Json<TokenPairResponse>, AppError> {
    let username = required("username", body.username)?;
    let password = required("password", body.password)?;

    let pair = state
        .auth_service()
        .obtain_pair(&username, &password)
        .await?;

    Ok(Json(TokenPairResponse::from(pair)))
}

/// Exchange a refresh token for a fresh access token
pub async fn refresh_access_token(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<RefreshTokenRequest>,
) -> Result<Json<AccessTokenResponse>, AppError> {
    let refresh = required("refresh", body.refresh)?;
    let access = state.auth_service().refresh(&refresh).await?;

    Ok(Json(AccessTokenResponse { access }))
}
