//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod auth;
pub mod catalog;
pub mod health;
pub mod metrics;
pub mod report;
pub mod user;
pub mod vehicle;
pub mod vehicle_service;
