//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::services::access_policy::{Owned, Scope};
use crate::shared::error::AppError;

/// Role flag distinguishing mechanics from vehicle owners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Mechanic,
    #[default]
    Owner,
}

impl UserType {
    /// Convert from database string representation.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "mechanic" => Self::Mechanic,
            _ => Self::Owner,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mechanic => "mechanic",
            Self::Owner => "owner",
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents an account: a mechanic, a vehicle owner, or an administrator.
///
/// Maps to the `users` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - username: VARCHAR(150) NOT NULL UNIQUE
/// - email, first_name, last_name: VARCHAR NOT NULL DEFAULT ''
/// - password_hash: VARCHAR(255) NOT NULL
/// - user_type: VARCHAR(20) DEFAULT 'owner'
/// - is_superuser, is_active: BOOLEAN
/// - date_joined: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    pub username: String,

    pub email: String,

    pub first_name: String,

    pub last_name: String,

    /// Argon2 password hash
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    pub user_type: UserType,

    pub is_superuser: bool,

    pub is_active: bool,

    pub date_joined: DateTime<Utc>,
}

impl User {
    /// "First Last", falling back to the username when both are blank.
    pub fn full_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let trimmed = full.trim();
        if trimmed.is_empty() {
            self.username.clone()
        } else {
            trimmed.to_string()
        }
    }

    pub fn is_mechanic(&self) -> bool {
        self.user_type == UserType::Mechanic
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(username) = changes.username {
            self.username = username;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(first_name) = changes.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            self.last_name = last_name;
        }
        if let Some(password_hash) = changes.password_hash {
            self.password_hash = password_hash;
        }
        if let Some(user_type) = changes.user_type {
            self.user_type = user_type;
        }
        if let Some(is_superuser) = changes.is_superuser {
            self.is_superuser = is_superuser;
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
    }
}

impl Owned for User {
    fn owner_id(&self) -> Option<i64> {
        Some(self.id)
    }
}

/// Fields required to insert a user.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub user_type: UserType,
    pub is_superuser: bool,
    pub is_active: bool,
}

impl NewUser {
    pub fn into_user(self, id: i64, date_joined: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            password_hash: self.password_hash,
            user_type: self.user_type,
            is_superuser: self.is_superuser,
            is_active: self.is_active,
            date_joined,
        }
    }
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: Option<String>,
    pub user_type: Option<UserType>,
    pub is_superuser: Option<bool>,
    pub is_active: Option<bool>,
}

/// Repository trait for User data access operations.
///
/// Implementations of this trait handle the actual storage interactions.
/// The trait is defined in the domain layer to maintain dependency inversion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List users visible under the given scope, ordered by id.
    async fn list(&self, scope: Scope) -> Result<Vec<User>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Insert a user. A taken username is a validation error.
    async fn create(&self, user: &NewUser) -> Result<User, AppError>;

    /// Persist every column of an existing user.
    async fn update(&self, user: &User) -> Result<User, AppError>;

    /// Delete a user and everything that references it.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
