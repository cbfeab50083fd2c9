//! Service Type Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{NewServiceType, Scope, ServiceType, ServiceTypeRepository};
use crate::infrastructure::database::map_write_error;
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct ServiceTypeRow {
    id: i64,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ServiceTypeRow> for ServiceType {
    fn from(row: ServiceTypeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL service type repository implementation.
#[derive(Clone)]
pub struct PgServiceTypeRepository {
    pool: PgPool,
}

impl PgServiceTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceTypeRepository for PgServiceTypeRepository {
    async fn list(&self, scope: Scope) -> Result<Vec<ServiceType>, AppError> {
        // Catalogue rows have no owner, so only an unrestricted scope sees them.
        if scope != Scope::All {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, ServiceTypeRow>(
            "SELECT id, name, description, created_at FROM service_types ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ServiceType::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ServiceType>, AppError> {
        let row = sqlx::query_as::<_, ServiceTypeRow>(
            "SELECT id, name, description, created_at FROM service_types WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ServiceType::from))
    }

    async fn create(&self, service_type: &NewServiceType) -> Result<ServiceType, AppError> {
        let row = sqlx::query_as::<_, ServiceTypeRow>(
            r#"
            INSERT INTO service_types (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(&service_type.name)
        .bind(&service_type.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, None))?;

        Ok(row.into())
    }

    async fn update(&self, service_type: &ServiceType) -> Result<ServiceType, AppError> {
        let row = sqlx::query_as::<_, ServiceTypeRow>(
            r#"
            UPDATE service_types
            SET name = $2, description = $3
            WHERE id = $1
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(service_type.id)
        .bind(&service_type.name)
        .bind(&service_type.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, None))?
        .ok_or_else(|| {
            AppError::NotFound(format!("Service type with id {} not found", service_type.id))
        })?;

        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM service_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Service type with id {} not found",
                id
            )));
        }

        Ok(())
    }
}
