//! Service type entity and repository trait.
//!
//! Maps to the `service_types` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::services::access_policy::{Owned, Scope};
use crate::shared::error::AppError;

/// A named category of maintenance work ("Engine", "Brakes", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceType {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Owned for ServiceType {
    fn owner_id(&self) -> Option<i64> {
        None
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewServiceType {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceTypeChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl ServiceType {
    pub fn apply(&mut self, changes: ServiceTypeChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
    }
}

impl NewServiceType {
    pub fn into_service_type(self, id: i64, created_at: DateTime<Utc>) -> ServiceType {
        ServiceType {
            id,
            name: self.name,
            description: self.description,
            created_at,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceTypeRepository: Send + Sync {
    async fn list(&self, scope: Scope) -> Result<Vec<ServiceType>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<ServiceType>, AppError>;

    async fn create(&self, service_type: &NewServiceType) -> Result<ServiceType, AppError>;

    async fn update(&self, service_type: &ServiceType) -> Result<ServiceType, AppError>;

    /// Delete a service type together with its sub-services and records.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
