//! Vehicle service record entity and repository trait.
//!
//! Maps to the `vehicle_services` table.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::services::access_policy::{Owned, Scope};
use crate::shared::error::AppError;

/// Progress of a service event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl ServiceStatus {
    /// Convert from database string representation.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            _ => Self::Pending,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// A maintenance event performed on a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleService {
    pub id: i64,
    #[serde(rename = "vehicle")]
    pub vehicle_id: i64,
    #[serde(rename = "service_type")]
    pub service_type_id: i64,
    #[serde(rename = "sub_service")]
    pub sub_service_id: Option<i64>,
    pub service_date: NaiveDate,
    pub status: ServiceStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for VehicleService {
    fn owner_id(&self) -> Option<i64> {
        None
    }
}

#[derive(Debug, Clone)]
pub struct NewVehicleService {
    pub vehicle_id: i64,
    pub service_type_id: i64,
    pub sub_service_id: Option<i64>,
    pub service_date: NaiveDate,
    pub status: ServiceStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct VehicleServiceChanges {
    pub vehicle_id: Option<i64>,
    pub service_type_id: Option<i64>,
    pub sub_service_id: Option<Option<i64>>,
    pub service_date: Option<NaiveDate>,
    pub status: Option<ServiceStatus>,
    pub notes: Option<Option<String>>,
}

impl VehicleService {
    pub fn apply(&mut self, changes: VehicleServiceChanges) {
        if let Some(v) = changes.vehicle_id {
            self.vehicle_id = v;
        }
        if let Some(v) = changes.service_type_id {
            self.service_type_id = v;
        }
        if let Some(v) = changes.sub_service_id {
            self.sub_service_id = v;
        }
        if let Some(v) = changes.service_date {
            self.service_date = v;
        }
        if let Some(v) = changes.status {
            self.status = v;
        }
        if let Some(v) = changes.notes {
            self.notes = v;
        }
    }
}

impl NewVehicleService {
    pub fn into_vehicle_service(self, id: i64, now: DateTime<Utc>) -> VehicleService {
        VehicleService {
            id,
            vehicle_id: self.vehicle_id,
            service_type_id: self.service_type_id,
            sub_service_id: self.sub_service_id,
            service_date: self.service_date,
            status: self.status,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleServiceRepository: Send + Sync {
    async fn list(&self, scope: Scope) -> Result<Vec<VehicleService>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<VehicleService>, AppError>;

    async fn create(&self, record: &NewVehicleService) -> Result<VehicleService, AppError>;

    async fn update(&self, record: &VehicleService) -> Result<VehicleService, AppError>;

    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
