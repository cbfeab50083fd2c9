//! Middleware
//!
//! Tower middleware for request processing. Applied outermost first:
//! trace, CORS, metrics, then authentication on protected routes.

pub mod auth;
pub mod cors;
pub mod logging;
pub mod metrics;

pub use auth::{auth_middleware, AuthUser, CREDENTIALS_MISSING};
pub use cors::create_cors_layer;
pub use logging::create_trace_layer;
pub use metrics::track_metrics;
