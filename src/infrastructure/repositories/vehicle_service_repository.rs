//! Vehicle Service Record Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::domain::{
    NewVehicleService, Scope, ServiceStatus, VehicleService, VehicleServiceRepository,
};
use crate::infrastructure::database::map_write_error;
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct VehicleServiceRow {
    id: i64,
    vehicle_id: i64,
    service_type_id: i64,
    sub_service_id: Option<i64>,
    service_date: NaiveDate,
    status: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<VehicleServiceRow> for VehicleService {
    fn from(row: VehicleServiceRow) -> Self {
        Self {
            id: row.id,
            vehicle_id: row.vehicle_id,
            service_type_id: row.service_type_id,
            sub_service_id: row.sub_service_id,
            service_date: row.service_date,
            status: ServiceStatus::from_str(&row.status),
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL vehicle service record repository implementation.
#[derive(Clone)]
pub struct PgVehicleServiceRepository {
    pool: PgPool,
}

impl PgVehicleServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleServiceRepository for PgVehicleServiceRepository {
    async fn list(&self, scope: Scope) -> Result<Vec<VehicleService>, AppError> {
        if scope != Scope::All {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, VehicleServiceRow>(
            r#"
            SELECT id, vehicle_id, service_type_id, sub_service_id, service_date,
                   status, notes, created_at, updated_at
            FROM vehicle_services
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(VehicleService::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<VehicleService>, AppError> {
        let row = sqlx::query_as::<_, VehicleServiceRow>(
            r#"
            SELECT id, vehicle_id, service_type_id, sub_service_id, service_date,
                   status, notes, created_at, updated_at
            FROM vehicle_services
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(VehicleService::from))
    }

    async fn create(&self, record: &NewVehicleService) -> Result<VehicleService, AppError> {
        let row = sqlx::query_as::<_, VehicleServiceRow>(
            r#"
            INSERT INTO vehicle_services (vehicle_id, service_type_id, sub_service_id,
                                          service_date, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, vehicle_id, service_type_id, sub_service_id, service_date,
                      status, notes, created_at, updated_at
            "#,
        )
        .bind(record.vehicle_id)
        .bind(record.service_type_id)
        .bind(record.sub_service_id)
        .bind(record.service_date)
        .bind(record.status.as_str())
        .bind(&record.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, None))?;

        Ok(row.into())
    }

    async fn update(&self, record: &VehicleService) -> Result<VehicleService, AppError> {
        let row = sqlx::query_as::<_, VehicleServiceRow>(
            r#"
            UPDATE vehicle_services
            SET vehicle_id = $2,
                service_type_id = $3,
                sub_service_id = $4,
                service_date = $5,
                status = $6,
                notes = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, vehicle_id, service_type_id, sub_service_id, service_date,
                      status, notes, created_at, updated_at
            "#,
        )
        .bind(record.id)
        .bind(record.vehicle_id)
        .bind(record.service_type_id)
        .bind(record.sub_service_id)
        .bind(record.service_date)
        .bind(record.status.as_str())
        .bind(&record.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, None))?
        .ok_or_else(|| {
            AppError::NotFound(format!("Vehicle service with id {} not found", record.id))
        })?;

        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicle_services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Vehicle service with id {} not found",
                id
            )));
        }

        Ok(())
    }
}
