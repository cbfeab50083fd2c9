//! # Fleet Server Library
//!
//! This crate provides a vehicle fleet and maintenance tracking backend with:
//! - RESTful HTTP API endpoints with JWT access/refresh tokens
//! - Row-level visibility by role (superuser, mechanic, owner)
//! - PDF export of the fleet
//! - PostgreSQL for persistent storage, or an in-memory store
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities, repository traits, access policy
//! - **Application Layer**: Business logic services and DTOs
//! - **Infrastructure Layer**: Database, PDF rendering and metrics
//! - **Presentation Layer**: HTTP handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! fleet_server/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities, repository traits, access policy
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Repositories, PDF reports, metrics
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Common utilities (errors, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
