//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Password verification, JWT token pair
//! - **UserService**: User accounts, scoped by the access policy
//! - **CatalogService**: Service types and sub-services
//! - **FleetService**: Vehicles and vehicle parts
//! - **MaintenanceService**: Vehicle service records
//! - **ReportService**: PDF export of the fleet

pub mod auth_service;
pub mod catalog_service;
pub mod fleet_service;
pub mod maintenance_service;
pub mod report_service;
pub mod user_service;

pub use auth_service::{
    hash_password, AuthError, AuthService, AuthServiceImpl, Claims, TokenPair, TokenType,
};
pub use catalog_service::{CatalogService, CatalogServiceImpl};
pub use fleet_service::{FleetService, FleetServiceImpl};
pub use maintenance_service::{MaintenanceService, MaintenanceServiceImpl};
pub use report_service::{ReportService, ReportServiceImpl};
pub use user_service::{UserService, UserServiceImpl};

use crate::domain::services::access_policy::Owned;
use crate::domain::Scope;
use crate::shared::error::AppError;

/// A row the caller may see, or 404.
///
/// Rows outside the caller's scope are indistinguishable from missing ones.
pub(crate) fn visible<T: Owned>(row: Option<T>, scope: Scope) -> Result<T, AppError> {
    row.filter(|r| scope.admits(r))
        .ok_or_else(|| AppError::NotFound("Not found.".into()))
}
