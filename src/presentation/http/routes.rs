//! Route Configuration
//!
//! Configures all HTTP routes for the API. Resource paths keep their
//! trailing slash (`/vehicle/`, `/vehicle/{id}/`).

use axum::{middleware, routing::get, routing::post, Router};

use super::handlers::{
    auth, catalog, health, metrics::metrics_handler, report, user, vehicle, vehicle_service,
};
use crate::presentation::middleware::{auth_middleware, track_metrics};
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(token_routes())
        .merge(protected_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Token endpoints (public)
fn token_routes() -> Router<AppState> {
    Router::new()
        .route("/token/request/", post(auth::obtain_token_pair))
        .route("/token/refresh/", post(auth::refresh_access_token))
}

/// Everything else requires a bearer access token
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/user/", get(user::list_users).post(user::create_user))
        .route(
            "/user/{id}/",
            get(user::get_user)
                .put(user::replace_user)
                .patch(user::update_user)
                .delete(user::delete_user),
        )
        .route("/current-user/", get(user::list_current_user))
        .route("/current-user/{id}/", get(user::get_current_user))
        .route(
            "/service-type/",
            get(catalog::list_service_types).post(catalog::create_service_type),
        )
        .route(
            "/service-type/{id}/",
            get(catalog::get_service_type)
                .put(catalog::replace_service_type)
                .patch(catalog::update_service_type)
                .delete(catalog::delete_service_type),
        )
        .route(
            "/sub-service/",
            get(catalog::list_sub_services).post(catalog::create_sub_service),
        )
        .route(
            "/sub-service/{id}/",
            get(catalog::get_sub_service)
                .put(catalog::replace_sub_service)
                .patch(catalog::update_sub_service)
                .delete(catalog::delete_sub_service),
        )
        .route(
            "/vehicle/",
            get(vehicle::list_vehicles).post(vehicle::create_vehicle),
        )
        .route(
            "/vehicle/{id}/",
            get(vehicle::get_vehicle)
                .put(vehicle::replace_vehicle)
                .patch(vehicle::update_vehicle)
                .delete(vehicle::delete_vehicle),
        )
        .route(
            "/vehicle-part/",
            get(vehicle::list_parts).post(vehicle::create_part),
        )
        .route(
            "/vehicle-part/{id}/",
            get(vehicle::get_part)
                .put(vehicle::replace_part)
                .patch(vehicle::update_part)
                .delete(vehicle::delete_part),
        )
        .route(
            "/vehicle-service/",
            get(vehicle_service::list_records).post(vehicle_service::create_record),
        )
        .route(
            "/vehicle-service/{id}/",
            get(vehicle_service::get_record)
                .put(vehicle_service::replace_record)
                .patch(vehicle_service::update_record)
                .delete(vehicle_service::delete_record),
        )
        .route("/pdf-report/", get(report::download_report))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
