//! User Repository Implementation
//!
//! PostgreSQL implementation of the UserRepository trait.
//! Maps between the database schema and domain User entity.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::USERNAME_TAKEN;
use crate::domain::{NewUser, Scope, User, UserRepository, UserType};
use crate::infrastructure::database::map_write_error;
use crate::shared::error::AppError;

/// Database row representation matching the users table schema.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    password_hash: String,
    user_type: String,
    is_superuser: bool,
    is_active: bool,
    date_joined: DateTime<Utc>,
}

impl UserRow {
    /// Convert database row to domain User entity.
    fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            password_hash: self.password_hash,
            user_type: UserType::from_str(&self.user_type),
            is_superuser: self.is_superuser,
            is_active: self.is_active,
            date_joined: self.date_joined,
        }
    }
}

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list(&self, scope: Scope) -> Result<Vec<User>, AppError> {
        let rows = match scope {
            Scope::All => {
                sqlx::query_as::<_, UserRow>(
                    r#"
                    SELECT id, username, email, first_name, last_name, password_hash,
                           user_type, is_superuser, is_active, date_joined
                    FROM users
                    ORDER BY id
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
            Scope::OwnedBy(user_id) => {
                sqlx::query_as::<_, UserRow>(
                    r#"
                    SELECT id, username, email, first_name, last_name, password_hash,
                           user_type, is_superuser, is_active, date_joined
                    FROM users
                    WHERE id = $1
                    "#,
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
            Scope::Nothing => Vec::new(),
        };

        Ok(rows.into_iter().map(UserRow::into_user).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, first_name, last_name, password_hash,
                   user_type, is_superuser, is_active, date_joined
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, first_name, last_name, password_hash,
                   user_type, is_superuser, is_active, date_joined
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, email, first_name, last_name, password_hash,
                               user_type, is_superuser, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, username, email, first_name, last_name, password_hash,
                      user_type, is_superuser, is_active, date_joined
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_hash)
        .bind(user.user_type.as_str())
        .bind(user.is_superuser)
        .bind(user.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, Some(USERNAME_TAKEN)))?;

        Ok(row.into_user())
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET username = $2,
                email = $3,
                first_name = $4,
                last_name = $5,
                password_hash = $6,
                user_type = $7,
                is_superuser = $8,
                is_active = $9
            WHERE id = $1
            RETURNING id, username, email, first_name, last_name, password_hash,
                      user_type, is_superuser, is_active, date_joined
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_hash)
        .bind(user.user_type.as_str())
        .bind(user.is_superuser)
        .bind(user.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, Some(USERNAME_TAKEN)))?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", user.id)))?;

        Ok(row.into_user())
    }

    /// Delete a user (hard delete, cascades through foreign keys).
    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }

        Ok(())
    }
}
