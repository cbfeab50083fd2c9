//! PDF Report Handler

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::application::services::ReportService;
use crate::infrastructure::pdf::ReportLayout;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub layout: ReportLayout,
}

/// `GET /pdf-report/[?layout=table|narrative]`
pub async fn download_report(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let report = state
        .report_service()
        .generate(&auth.0, query.layout)
        .await?;

    let disposition = format!("attachment; filename=\"{}\"", report.layout.filename());
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_owned()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    )
        .into_response())
}
