//! Database Module
//!
//! PostgreSQL connection pool and schema management.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use crate::config::DatabaseSettings;
use crate::shared::error::AppError;

/// Create a PostgreSQL connection pool
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout))
        .connect(&settings.url)
        .await
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Round-trip a trivial query to confirm the pool can serve requests.
pub async fn ping(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await?;
    Ok(())
}

/// Map constraint violations to field-level validation errors.
///
/// `unique_field` names the request field guarded by the table's unique
/// constraint, if any.
pub(crate) fn map_write_error(err: sqlx::Error, unique_field: Option<(&str, &str)>) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            if let Some((field, message)) = unique_field {
                return AppError::invalid(field, message);
            }
        }
        if db_err.is_foreign_key_violation() {
            let field = db_err
                .constraint()
                .and_then(constraint_field)
                .unwrap_or("non_field_errors");
            return AppError::invalid(field, "Referenced object does not exist.");
        }
    }
    AppError::Database(err)
}

/// `vehicles_mechanic_id_fkey` -> `mechanic`
fn constraint_field(constraint: &str) -> Option<&str> {
    let column = constraint.strip_suffix("_fkey")?;
    let column = column.strip_suffix("_id")?;
    [
        "vehicle_owner",
        "mechanic",
        "vehicle",
        "service_type",
        "sub_service",
    ]
    .into_iter()
    .find(|field| column.ends_with(&format!("_{field}")))
}
