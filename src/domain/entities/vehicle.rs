//! Vehicle entity and repository trait.
//!
//! Maps to the `vehicles` table:
//! - id: BIGSERIAL PRIMARY KEY
//! - vehicle_plate_number: VARCHAR(20) NOT NULL UNIQUE
//! - vehicle_type, vehicle_model, vehicle_engine_number, vehicle_color,
//!   vehicle_general_condition: VARCHAR NOT NULL
//! - vehicle_owner_id: BIGINT REFERENCES users(id)
//! - mechanic_id: BIGINT REFERENCES users(id)
//! - created_at, updated_at: TIMESTAMPTZ

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::services::access_policy::{Owned, Scope};
use crate::shared::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub vehicle_plate_number: String,
    pub vehicle_type: String,
    pub vehicle_model: String,
    pub vehicle_engine_number: String,
    pub vehicle_color: String,
    pub vehicle_general_condition: String,
    #[serde(rename = "vehicle_owner")]
    pub vehicle_owner_id: i64,
    #[serde(rename = "mechanic")]
    pub mechanic_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Vehicles are visible to the mechanic assigned to them.
impl Owned for Vehicle {
    fn owner_id(&self) -> Option<i64> {
        Some(self.mechanic_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewVehicle {
    pub vehicle_plate_number: String,
    pub vehicle_type: String,
    pub vehicle_model: String,
    pub vehicle_engine_number: String,
    pub vehicle_color: String,
    pub vehicle_general_condition: String,
    pub vehicle_owner_id: i64,
    pub mechanic_id: i64,
}

#[derive(Debug, Clone, Default)]
pub struct VehicleChanges {
    pub vehicle_plate_number: Option<String>,
    pub vehicle_type: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_engine_number: Option<String>,
    pub vehicle_color: Option<String>,
    pub vehicle_general_condition: Option<String>,
    pub vehicle_owner_id: Option<i64>,
    pub mechanic_id: Option<i64>,
}

impl Vehicle {
    pub fn apply(&mut self, changes: VehicleChanges) {
        if let Some(v) = changes.vehicle_plate_number {
            self.vehicle_plate_number = v;
        }
        if let Some(v) = changes.vehicle_type {
            self.vehicle_type = v;
        }
        if let Some(v) = changes.vehicle_model {
            self.vehicle_model = v;
        }
        if let Some(v) = changes.vehicle_engine_number {
            self.vehicle_engine_number = v;
        }
        if let Some(v) = changes.vehicle_color {
            self.vehicle_color = v;
        }
        if let Some(v) = changes.vehicle_general_condition {
            self.vehicle_general_condition = v;
        }
        if let Some(v) = changes.vehicle_owner_id {
            self.vehicle_owner_id = v;
        }
        if let Some(v) = changes.mechanic_id {
            self.mechanic_id = v;
        }
    }
}

impl NewVehicle {
    pub fn into_vehicle(self, id: i64, now: DateTime<Utc>) -> Vehicle {
        Vehicle {
            id,
            vehicle_plate_number: self.vehicle_plate_number,
            vehicle_type: self.vehicle_type,
            vehicle_model: self.vehicle_model,
            vehicle_engine_number: self.vehicle_engine_number,
            vehicle_color: self.vehicle_color,
            vehicle_general_condition: self.vehicle_general_condition,
            vehicle_owner_id: self.vehicle_owner_id,
            mechanic_id: self.mechanic_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// List vehicles whose mechanic the scope admits, ordered by id.
    async fn list(&self, scope: Scope) -> Result<Vec<Vehicle>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Vehicle>, AppError>;

    /// Insert a vehicle. A duplicate plate number is a validation error.
    async fn create(&self, vehicle: &NewVehicle) -> Result<Vehicle, AppError>;

    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError>;

    /// Delete a vehicle with its parts and service records.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
