//! Authentication Service
//!
//! Handles password verification and the access/refresh token pair.
//!
//! Both tokens are HS256 JWTs carrying the user's identity claims. They differ
//! in `token_type` and lifetime. Refreshing re-reads the user row, so a
//! deleted or deactivated account cannot mint new access tokens.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::JwtSettings;
use crate::domain::{User, UserRepository, UserType};
use crate::shared::error::AppError;

pub const INVALID_CREDENTIALS: &str = "No active account found with the given credentials";
pub const INVALID_TOKEN: &str = "Token is invalid or expired";

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for an access/refresh pair
    async fn obtain_pair(&self, username: &str, password: &str) -> Result<TokenPair, AuthError>;

    /// Exchange a refresh token for a new access token
    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError>;

    /// Validate an access token and load its user
    async fn authenticate(&self, access_token: &str) -> Result<User, AuthError>;
}

/// Issued token pair
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub token_type: TokenType,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    pub jti: String,
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub user_type: UserType,
    pub is_superuser: bool,
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => AppError::Unauthorized(INVALID_CREDENTIALS.into()),
            AuthError::TokenExpired | AuthError::InvalidToken => {
                AppError::Unauthorized(INVALID_TOKEN.into())
            }
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against its hash
fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// AuthService implementation
pub struct AuthServiceImpl {
    user_repo: Arc<dyn UserRepository>,
    jwt_settings: JwtSettings,
}

impl AuthServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt_settings: JwtSettings) -> Self {
        Self {
            user_repo,
            jwt_settings,
        }
    }

    fn issue(&self, user: &User, token_type: TokenType) -> Result<String, AuthError> {
        let lifetime = match token_type {
            TokenType::Access => Duration::minutes(self.jwt_settings.access_token_expiry_minutes),
            TokenType::Refresh => Duration::days(self.jwt_settings.refresh_token_expiry_days),
        };
        self.issue_with_lifetime(user, token_type, lifetime)
    }

    fn issue_with_lifetime(
        &self,
        user: &User,
        token_type: TokenType,
        lifetime: Duration,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            token_type,
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
            jti: uuid::Uuid::new_v4().simple().to_string(),
            user_id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            user_type: user.user_type,
            is_superuser: user.is_superuser,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_settings.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))
    }

    /// Decode a token and check it is of the expected type
    fn decode_token(&self, token: &str, expected: TokenType) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_settings.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        if token_data.claims.token_type != expected {
            return Err(AuthError::InvalidToken);
        }

        Ok(token_data.claims)
    }

    /// The token's user, if it still exists and is active
    async fn active_user(&self, claims: &Claims) -> Result<User, AuthError> {
        self.user_repo
            .find_by_id(claims.user_id)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .filter(|user| user.is_active)
            .ok_or(AuthError::InvalidToken)
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn obtain_pair(&self, username: &str, password: &str) -> Result<TokenPair, AuthError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .filter(|user| user.is_active)
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = user.id, "Issued token pair");

        Ok(TokenPair {
            access: self.issue(&user, TokenType::Access)?,
            refresh: self.issue(&user, TokenType::Refresh)?,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let claims = self.decode_token(refresh_token, TokenType::Refresh)?;
        let user = self.active_user(&claims).await?;

        self.issue(&user, TokenType::Access)
    }

    async fn authenticate(&self, access_token: &str) -> Result<User, AuthError> {
        let claims = self.decode_token(access_token, TokenType::Access)?;
        self.active_user(&claims).await
    }
}
