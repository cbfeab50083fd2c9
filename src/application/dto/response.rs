//! Response DTOs
//!
//! Data structures for API response bodies. Entities serialize themselves;
//! only the token endpoints and probes need dedicated shapes.

use serde::Serialize;

use crate::application::services::TokenPair;

/// `POST /token/request/` response
#[derive(Debug, Serialize)]
pub struct TokenPairResponse {
    pub refresh: String,
    pub access: String,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            refresh: pair.refresh,
            access: pair.access,
        }
    }
}

/// `POST /token/refresh/` response
#[derive(Debug, Serialize)]
pub struct AccessTokenResponse {
    pub access: String,
}

/// Health probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
