//! Vehicle Part Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{NewVehiclePart, Scope, VehiclePart, VehiclePartRepository};
use crate::infrastructure::database::map_write_error;
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct VehiclePartRow {
    id: i64,
    vehicle_id: i64,
    mechanic_id: i64,
    part_name: String,
    part_condition: String,
    part_status: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<VehiclePartRow> for VehiclePart {
    fn from(row: VehiclePartRow) -> Self {
        Self {
            id: row.id,
            vehicle_id: row.vehicle_id,
            mechanic_id: row.mechanic_id,
            part_name: row.part_name,
            part_condition: row.part_condition,
            part_status: row.part_status,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL vehicle part repository implementation.
#[derive(Clone)]
pub struct PgVehiclePartRepository {
    pool: PgPool,
}

impl PgVehiclePartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehiclePartRepository for PgVehiclePartRepository {
    async fn list(&self, scope: Scope) -> Result<Vec<VehiclePart>, AppError> {
        let rows = match scope {
            Scope::All => {
                sqlx::query_as::<_, VehiclePartRow>(
                    r#"
                    SELECT id, vehicle_id, mechanic_id, part_name, part_condition,
                           part_status, notes, created_at, updated_at
                    FROM vehicle_parts
                    ORDER BY id
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
            Scope::OwnedBy(mechanic_id) => {
                sqlx::query_as::<_, VehiclePartRow>(
                    r#"
                    SELECT id, vehicle_id, mechanic_id, part_name, part_condition,
                           part_status, notes, created_at, updated_at
                    FROM vehicle_parts
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

        Ok(rows.into_iter().map(VehiclePart::from).collect())
    }

    async fn list_for_vehicle(&self, vehicle_id: i64) -> Result<Vec<VehiclePart>, AppError> {
        let rows = sqlx::query_as::<_, VehiclePartRow>(
            r#"
            SELECT id, vehicle_id, mechanic_id, part_name, part_condition,
                   part_status, notes, created_at, updated_at
            FROM vehicle_parts
            WHERE vehicle_id = $1
            ORDER BY id
            "#,
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(VehiclePart::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<VehiclePart>, AppError> {
        let row = sqlx::query_as::<_, VehiclePartRow>(
            r#"
            SELECT id, vehicle_id, mechanic_id, part_name, part_condition,
                   part_status, notes, created_at, updated_at
            FROM vehicle_parts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(VehiclePart::from))
    }

    async fn create(&self, part: &NewVehiclePart) -> Result<VehiclePart, AppError> {
        let row = sqlx::query_as::<_, VehiclePartRow>(
            r#"
            INSERT INTO vehicle_parts (vehicle_id, mechanic_id, part_name, part_condition,
                                       part_status, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, vehicle_id, mechanic_id, part_name, part_condition,
                      part_status, notes, created_at, updated_at
            "#,
        )
        .bind(part.vehicle_id)
        .bind(part.mechanic_id)
        .bind(&part.part_name)
        .bind(&part.part_condition)
        .bind(&part.part_status)
        .bind(&part.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, None))?;

        Ok(row.into())
    }

    async fn update(&self, part: &VehiclePart) -> Result<VehiclePart, AppError> {
        let row = sqlx::query_as::<_, VehiclePartRow>(
            r#"
            UPDATE vehicle_parts
            SET vehicle_id = $2,
                mechanic_id = $3,
                part_name = $4,
                part_condition = $5,
                part_status = $6,
                notes = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, vehicle_id, mechanic_id, part_name, part_condition,
                      part_status, notes, created_at, updated_at
            "#,
        )
        .bind(part.id)
        .bind(part.vehicle_id)
        .bind(part.mechanic_id)
        .bind(&part.part_name)
        .bind(&part.part_condition)
        .bind(&part.part_status)
        .bind(&part.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, None))?
        .ok_or_else(|| AppError::NotFound(format!("Vehicle part with id {} not found", part.id)))?;

        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicle_parts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Vehicle part with id {} not found",
                id
            )));
        }

        Ok(())
    }
}
