//! # Domain Layer
//!
//! The domain layer contains the core business model of the fleet backend.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Users, vehicles, parts, service catalogue and service records
//! - **services**: Domain services (the access policy)
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Entities encapsulate their own update rules

pub mod entities;
pub mod services;

// Re-export commonly used types
pub use entities::*;
pub use services::{scope_for, Owned, Principal, Resource, Scope};
