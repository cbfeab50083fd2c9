//! User Service
//!
//! Handles user account management. Visibility follows the access policy:
//! superusers manage every account, everyone else only their own.

use std::sync::Arc;

use async_trait::async_trait;

use super::auth_service::hash_password;
use super::visible;
use crate::application::dto::request::{CreateUserRequest, UpdateUserRequest};
use crate::domain::{scope_for, NewUser, Principal, Resource, User, UserChanges, UserRepository};
use crate::shared::error::AppError;
use crate::shared::validation::required;

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    /// List users visible through `resource` (`User` or `CurrentUser`)
    async fn list(&self, principal: &Principal, resource: Resource) -> Result<Vec<User>, AppError>;

    /// Get a user visible through `resource`
    async fn get(&self, principal: &Principal, resource: Resource, id: i64)
        -> Result<User, AppError>;

    async fn create(&self, principal: &Principal, body: CreateUserRequest)
        -> Result<User, AppError>;

    async fn update(
        &self,
        principal: &Principal,
        id: i64,
        body: UpdateUserRequest,
    ) -> Result<User, AppError>;

    async fn delete(&self, principal: &Principal, id: i64) -> Result<(), AppError>;
}

/// UserService implementation
pub struct UserServiceImpl {
    user_repo: Arc<dyn UserRepository>,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Only superusers may hand out superuser status.
    fn check_superuser_grant(principal: &Principal, is_superuser: Option<bool>) -> Result<(), AppError> {
        if is_superuser == Some(true) && !principal.is_superuser {
            return Err(AppError::invalid(
                "is_superuser",
                "Only a superuser can grant superuser status.",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn list(&self, principal: &Principal, resource: Resource) -> Result<Vec<User>, AppError> {
        self.user_repo.list(scope_for(resource, principal)).await
    }

    async fn get(
        &self,
        principal: &Principal,
        resource: Resource,
        id: i64,
    ) -> Result<User, AppError> {
        let user = self.user_repo.find_by_id(id).await?;
        visible(user, scope_for(resource, principal))
    }

    async fn create(
        &self,
        principal: &Principal,
        body: CreateUserRequest,
    ) -> Result<User, AppError> {
        Self::check_superuser_grant(principal, body.is_superuser)?;

        let password = required("password", body.password)?;
        let new_user = NewUser {
            username: required("username", body.username)?,
            email: body.email.unwrap_or_default(),
            first_name: body.first_name.unwrap_or_default(),
            last_name: body.last_name.unwrap_or_default(),
            password_hash: hash_password(&password)?,
            user_type: body.user_type.unwrap_or_default(),
            is_superuser: body.is_superuser.unwrap_or(false),
            is_active: body.is_active.unwrap_or(true),
        };

        let user = self.user_repo.create(&new_user).await?;
        tracing::info!(user_id = user.id, created_by = principal.user_id, "User created");
        Ok(user)
    }

    async fn update(
        &self,
        principal: &Principal,
        id: i64,
        body: UpdateUserRequest,
    ) -> Result<User, AppError> {
        let mut user = self.get(principal, Resource::User, id).await?;
        Self::check_superuser_grant(principal, body.is_superuser)?;

        let password_hash = body.password.as_deref().map(hash_password).transpose()?;
        user.apply(UserChanges {
            username: body.username,
            email: body.email,
            first_name: body.first_name,
            last_name: body.last_name,
            password_hash,
            user_type: body.user_type,
            is_superuser: body.is_superuser,
            is_active: body.is_active,
        });

        self.user_repo.update(&user).await
    }

    async fn delete(&self, principal: &Principal, id: i64) -> Result<(), AppError> {
        let user = self.get(principal, Resource::User, id).await?;
        self.user_repo.delete(user.id).await?;
        tracing::info!(user_id = id, deleted_by = principal.user_id, "User deleted");
        Ok(())
    }
}
