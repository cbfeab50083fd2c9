//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database access (PostgreSQL) and the in-memory store
//! - Prometheus metrics
//! - PDF rendering

pub mod database;
pub mod metrics;
pub mod pdf;
pub mod repositories;
