//! Sub-service entity and repository trait.
//!
//! Maps to the `sub_services` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::services::access_policy::{Owned, Scope};
use crate::shared::error::AppError;

/// A finer-grained task within a service type ("Oil change" under "Engine").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubService {
    pub id: i64,
    #[serde(rename = "service_type")]
    pub service_type_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Owned for SubService {
    fn owner_id(&self) -> Option<i64> {
        None
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewSubService {
    pub service_type_id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SubServiceChanges {
    pub service_type_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl SubService {
    pub fn apply(&mut self, changes: SubServiceChanges) {
        if let Some(service_type_id) = changes.service_type_id {
            self.service_type_id = service_type_id;
        }
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
    }
}

impl NewSubService {
    pub fn into_sub_service(self, id: i64, created_at: DateTime<Utc>) -> SubService {
        SubService {
            id,
            service_type_id: self.service_type_id,
            name: self.name,
            description: self.description,
            created_at,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubServiceRepository: Send + Sync {
    async fn list(&self, scope: Scope) -> Result<Vec<SubService>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<SubService>, AppError>;

    async fn create(&self, sub_service: &NewSubService) -> Result<SubService, AppError>;

    async fn update(&self, sub_service: &SubService) -> Result<SubService, AppError>;

    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
