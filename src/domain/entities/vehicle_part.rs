//! Vehicle part entity and repository trait.
//!
//! Maps to the `vehicle_parts` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::services::access_policy::{Owned, Scope};
use crate::shared::error::AppError;

/// A component of a vehicle tracked by the mechanic servicing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehiclePart {
    pub id: i64,
    #[serde(rename = "vehicle")]
    pub vehicle_id: i64,
    #[serde(rename = "mechanic")]
    pub mechanic_id: i64,
    pub part_name: String,
    pub part_condition: String,
    pub part_status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VehiclePart {
    /// One-line description used in reports.
    pub fn summary(&self) -> String {
        format!(
            "{} ({}, {})",
            self.part_name, self.part_condition, self.part_status
        )
    }

    pub fn apply(&mut self, changes: VehiclePartChanges) {
        if let Some(v) = changes.vehicle_id {
            self.vehicle_id = v;
        }
        if let Some(v) = changes.mechanic_id {
            self.mechanic_id = v;
        }
        if let Some(v) = changes.part_name {
            self.part_name = v;
        }
        if let Some(v) = changes.part_condition {
            self.part_condition = v;
        }
        if let Some(v) = changes.part_status {
            self.part_status = v;
        }
        if let Some(v) = changes.notes {
            self.notes = v;
        }
    }
}

impl Owned for VehiclePart {
    fn owner_id(&self) -> Option<i64> {
        Some(self.mechanic_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewVehiclePart {
    pub vehicle_id: i64,
    pub mechanic_id: i64,
    pub part_name: String,
    pub part_condition: String,
    pub part_status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct VehiclePartChanges {
    pub vehicle_id: Option<i64>,
    pub mechanic_id: Option<i64>,
    pub part_name: Option<String>,
    pub part_condition: Option<String>,
    pub part_status: Option<String>,
    pub notes: Option<Option<String>>,
}

impl NewVehiclePart {
    pub fn into_vehicle_part(self, id: i64, now: DateTime<Utc>) -> VehiclePart {
        VehiclePart {
            id,
            vehicle_id: self.vehicle_id,
            mechanic_id: self.mechanic_id,
            part_name: self.part_name,
            part_condition: self.part_condition,
            part_status: self.part_status,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehiclePartRepository: Send + Sync {
    /// List parts whose mechanic the scope admits, ordered by id.
    async fn list(&self, scope: Scope) -> Result<Vec<VehiclePart>, AppError>;

    /// Every part fitted to a vehicle, regardless of mechanic.
    async fn list_for_vehicle(&self, vehicle_id: i64) -> Result<Vec<VehiclePart>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<VehiclePart>, AppError>;

    async fn create(&self, part: &NewVehiclePart) -> Result<VehiclePart, AppError>;

    async fn update(&self, part: &VehiclePart) -> Result<VehiclePart, AppError>;

    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
