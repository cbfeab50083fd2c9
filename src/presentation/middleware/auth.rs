//! Authentication Middleware
//!
//! Bearer-token validation for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::application::services::AuthService;
use crate::domain::{Principal, User};
use crate::shared::error::AppError;
use crate::startup::AppState;

pub const CREDENTIALS_MISSING: &str = "Authentication credentials were not provided.";

/// The caller's user row, loaded fresh for every request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn principal(&self) -> Principal {
        Principal::from(&self.0)
    }
}

/// Reject requests without a valid access token before any handler runs.
///
/// The user row is re-read on each request so deactivation and role changes
/// apply immediately.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Authorization(bearer) = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(|| AppError::Unauthorized(CREDENTIALS_MISSING.into()))?;

    let user = state.auth_service().authenticate(bearer.token()).await?;
    tracing::debug!(user_id = user.id, "Request authenticated");

    request.extensions_mut().insert(AuthUser(user));
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized(CREDENTIALS_MISSING.into()))
    }
}
