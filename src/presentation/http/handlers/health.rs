//! Health Check Handlers
//!
//! Kubernetes-style liveness and readiness probes. None of them require
//! authentication.
//!
//! # Endpoints
//! - `GET /health` - Basic health check
//! - `GET /health/live` - Liveness probe (is the server running?)
//! - `GET /health/ready` - Readiness probe (can the store be reached?)

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::application::dto::response::HealthResponse;
use crate::startup::AppState;

/// Server start time for uptime calculation
static SERVER_START: Lazy<Instant> = Lazy::new(Instant::now);

/// Initialize the server start time (call during startup)
pub fn init_server_start() {
    Lazy::force(&SERVER_START);
}

/// Readiness probe response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub store: StoreHealth,
}

#[derive(Debug, Serialize)]
pub struct StoreHealth {
    pub backend: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn ok() -> HealthResponse {
    HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(ok())
}

/// Liveness probe - the process is up and serving
pub async fn liveness() -> Json<HealthResponse> {
    Json(ok())
}

/// Readiness probe - 200 when the store answers, 503 otherwise
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let backend = state.repos.backend_name();

    let (status_code, status, store) = match state.repos.ping().await {
        Ok(()) => (
            StatusCode::OK,
            "ok",
            StoreHealth {
                backend,
                latency_ms: Some(start.elapsed().as_millis() as u64),
                message: None,
            },
        ),
        Err(e) => {
            tracing::warn!(backend, error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "unavailable",
                StoreHealth {
                    backend,
                    latency_ms: None,
                    message: Some(e.to_string()),
                },
            )
        }
    };

    let response = ReadinessResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: SERVER_START.elapsed().as_secs(),
        store,
    };

    (status_code, Json(response))
}
