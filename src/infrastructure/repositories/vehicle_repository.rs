//! Vehicle Repository Implementation
//!
//! PostgreSQL implementation of the VehicleRepository trait. Scoped listing
//! filters on `mechanic_id`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::PLATE_TAKEN;
use crate::domain::{NewVehicle, Scope, Vehicle, VehicleRepository};
use crate::infrastructure::database::map_write_error;
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: i64,
    vehicle_plate_number: String,
    vehicle_type: String,
    vehicle_model: String,
    vehicle_engine_number: String,
    vehicle_color: String,
    vehicle_general_condition: String,
    vehicle_owner_id: i64,
    mechanic_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl VehicleRow {
    fn into_vehicle(self) -> Vehicle {
        Vehicle {
            id: self.id,
            vehicle_plate_number: self.vehicle_plate_number,
            vehicle_type: self.vehicle_type,
            vehicle_model: self.vehicle_model,
            vehicle_engine_number: self.vehicle_engine_number,
            vehicle_color: self.vehicle_color,
            vehicle_general_condition: self.vehicle_general_condition,
            vehicle_owner_id: self.vehicle_owner_id,
            mechanic_id: self.mechanic_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// PostgreSQL vehicle repository implementation.
#[derive(Clone)]
pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn list(&self, scope: Scope) -> Result<Vec<Vehicle>, AppError> {
        let rows = match scope {
            Scope::All => {
                sqlx::query_as::<_, VehicleRow>(
                    r#"
                    SELECT id, vehicle_plate_number, vehicle_type, vehicle_model,
                           vehicle_engine_number, vehicle_color, vehicle_general_condition,
                           vehicle_owner_id, mechanic_id, created_at, updated_at
                    FROM vehicles
                    ORDER BY id
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
            Scope::OwnedBy(mechanic_id) => {
                sqlx::query_as::<_, VehicleRow>(
                    r#"
                    SELECT id, vehicle_plate_number, vehicle_type, vehicle_model,
                           vehicle_engine_number, vehicle_color, vehicle_general_condition,
                           vehicle_owner_id, mechanic_id, created_at, updated_at
                    FROM vehicles
                    WHERE mechanic_id = $1
                    ORDER BY id
                    "#,
                )
                .bind(mechanic_id)
                .fetch_all(&self.pool)
                .await?
            }
            Scope::Nothing => Vec::new(),
        };

        Ok(rows.into_iter().map(VehicleRow::into_vehicle).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Vehicle>, AppError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT id, vehicle_plate_number, vehicle_type, vehicle_model,
                   vehicle_engine_number, vehicle_color, vehicle_general_condition,
                   vehicle_owner_id, mechanic_id, created_at, updated_at
            FROM vehicles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(VehicleRow::into_vehicle))
    }

    async fn create(&self, vehicle: &NewVehicle) -> Result<Vehicle, AppError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            INSERT INTO vehicles (vehicle_plate_number, vehicle_type, vehicle_model,
                                  vehicle_engine_number, vehicle_color,
                                  vehicle_general_condition, vehicle_owner_id, mechanic_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, vehicle_plate_number, vehicle_type, vehicle_model,
                      vehicle_engine_number, vehicle_color, vehicle_general_condition,
                      vehicle_owner_id, mechanic_id, created_at, updated_at
            "#,
        )
        .bind(&vehicle.vehicle_plate_number)
        .bind(&vehicle.vehicle_type)
        .bind(&vehicle.vehicle_model)
        .bind(&vehicle.vehicle_engine_number)
        .bind(&vehicle.vehicle_color)
        .bind(&vehicle.vehicle_general_condition)
        .bind(vehicle.vehicle_owner_id)
        .bind(vehicle.mechanic_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, Some(PLATE_TAKEN)))?;

        Ok(row.into_vehicle())
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            UPDATE vehicles
            SET vehicle_plate_number = $2,
                vehicle_type = $3,
                vehicle_model = $4,
                vehicle_engine_number = $5,
                vehicle_color = $6,
                vehicle_general_condition = $7,
                vehicle_owner_id = $8,
                mechanic_id = $9,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, vehicle_plate_number, vehicle_type, vehicle_model,
                      vehicle_engine_number, vehicle_color, vehicle_general_condition,
                      vehicle_owner_id, mechanic_id, created_at, updated_at
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.vehicle_plate_number)
        .bind(&vehicle.vehicle_type)
        .bind(&vehicle.vehicle_model)
        .bind(&vehicle.vehicle_engine_number)
        .bind(&vehicle.vehicle_color)
        .bind(&vehicle.vehicle_general_condition)
        .bind(vehicle.vehicle_owner_id)
        .bind(vehicle.mechanic_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, Some(PLATE_TAKEN)))?
        .ok_or_else(|| AppError::NotFound(format!("Vehicle with id {} not found", vehicle.id)))?;

        Ok(row.into_vehicle())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Vehicle with id {} not found", id)));
        }

        Ok(())
    }
}
