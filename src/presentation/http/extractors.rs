//! Custom Extractors
//!
//! Request parsing that fails with the API's JSON error body instead of
//! axum's plain-text rejections.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::shared::error::AppError;
use crate::shared::validation::validate;

/// JSON body that has passed its `validator` rules.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::JsonDataError(err) => {
                    let text = err.body_text();
                    field_error(&text).unwrap_or(AppError::BadRequest(text))
                }
                other => AppError::BadRequest(other.body_text()),
            })?;
        validate(&body)?;
        Ok(Self(body))
    }
}

/// Turn a well-formed body with a badly typed value into a field error.
///
/// The rejection text reads `<context>: <path>: <serde message> at line L column C`;
/// errors at the document root carry no path and stay plain bad requests.
fn field_error(text: &str) -> Option<AppError> {
    let (_, detail) = text.split_once(": ")?;
    let (path, message) = detail.split_once(": ")?;
    let is_path = !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
    if !is_path {
        return None;
    }
    let message = message.split(" at line ").next().unwrap_or(message);
    Some(AppError::invalid(path, message))
}

/// Numeric `{id}` path segment. Anything else cannot name a row.
#[derive(Debug, Clone, Copy)]
pub struct RowId(pub i64);

impl<S> FromRequestParts<S> for RowId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound("Not found.".into()))?;
        Ok(Self(id))
    }
}
