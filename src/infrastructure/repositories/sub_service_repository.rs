//! Sub-Service Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::SUB_SERVICE_IN_USE;
use crate::domain::{NewSubService, Scope, SubService, SubServiceRepository};
use crate::infrastructure::database::map_write_error;
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct SubServiceRow {
    id: i64,
    service_type_id: i64,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<SubServiceRow> for SubService {
    fn from(row: SubServiceRow) -> Self {
        Self {
            id: row.id,
            service_type_id: row.service_type_id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL sub-service repository implementation.
#[derive(Clone)]
pub struct PgSubServiceRepository {
    pool: PgPool,
}

impl PgSubServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubServiceRepository for PgSubServiceRepository {
    async fn list(&self, scope: Scope) -> Result<Vec<SubService>, AppError> {
        if scope != Scope::All {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, SubServiceRow>(
            r#"
            SELECT id, service_type_id, name, description, created_at
            FROM sub_services
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SubService::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<SubService>, AppError> {
        let row = sqlx::query_as::<_, SubServiceRow>(
            r#"
            SELECT id, service_type_id, name, description, created_at
            FROM sub_services
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SubService::from))
    }

    async fn create(&self, sub_service: &NewSubService) -> Result<SubService, AppError> {
        let row = sqlx::query_as::<_, SubServiceRow>(
            r#"
            INSERT INTO sub_services (service_type_id, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, service_type_id, name, description, created_at
            "#,
        )
        .bind(sub_service.service_type_id)
        .bind(&sub_service.name)
        .bind(&sub_service.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, None))?;

        Ok(row.into())
    }

    async fn update(&self, sub_service: &SubService) -> Result<SubService, AppError> {
        // Records must keep a sub-service of their own service type.
        let row = sqlx::query_as::<_, SubServiceRow>(
            r#"
            UPDATE sub_services
            SET service_type_id = $2, name = $3, description = $4
            WHERE id = $1
              AND NOT EXISTS (
                  SELECT 1 FROM vehicle_services
                  WHERE sub_service_id = $1 AND service_type_id <> $2
              )
            RETURNING id, service_type_id, name, description, created_at
            "#,
        )
        .bind(sub_service.id)
        .bind(sub_service.service_type_id)
        .bind(&sub_service.name)
        .bind(&sub_service.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, None))?;

        if let Some(row) = row {
            return Ok(row.into());
        }

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM sub_services WHERE id = $1)",
        )
        .bind(sub_service.id)
        .fetch_one(&self.pool)
        .await?;

        if exists {
            let (field, message) = SUB_SERVICE_IN_USE;
            Err(AppError::invalid(field, message))
        } else {
            Err(AppError::NotFound(format!(
                "Sub-service with id {} not found",
                sub_service.id
            )))
        }
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM sub_services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Sub-service with id {} not found",
                id
            )));
        }

        Ok(())
    }
}
