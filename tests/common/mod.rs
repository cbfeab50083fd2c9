//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure. Every test gets its own
//! router over a fresh in-memory store.

use axum_test::{TestResponse, TestServer};
use serde_json::{json, Value};

use fleet_server::application::services::hash_password;
use fleet_server::config::{
    CorsSettings, DatabaseSettings, JwtSettings, ServerSettings, Settings, MEMORY_DATABASE_URL,
};
use fleet_server::domain::{NewUser, NewVehicle, User, UserType, Vehicle};
use fleet_server::infrastructure::repositories::Repositories;
use fleet_server::startup::{build_router, AppState};

/// Password shared by every seeded account
pub const PASSWORD: &str = "TestPassword123!";

pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseSettings {
            url: MEMORY_DATABASE_URL.into(),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: 1,
            run_migrations: false,
        },
        jwt: JwtSettings {
            secret: "integration-test-secret-0123456789abcdef".into(),
            access_token_expiry_minutes: 15,
            refresh_token_expiry_days: 7,
        },
        cors: CorsSettings {
            allowed_origins: vec![],
        },
        bootstrap: None,
        log_format: "pretty".into(),
        environment: "test".into(),
    }
}

/// Test application over the in-memory store
pub struct TestApp {
    pub server: TestServer,
    pub repos: Repositories,
}

impl TestApp {
    pub fn new() -> Self {
        let repos = Repositories::in_memory();
        let state = AppState::new(repos.clone(), test_settings());
        let server = TestServer::new(build_router(state)).expect("failed to start test server");
        Self { server, repos }
    }

    /// Insert an active account straight into the store
    pub async fn seed_user(&self, username: &str, user_type: UserType, is_superuser: bool) -> User {
        self.repos
            .users
            .create(&NewUser {
                username: username.into(),
                email: format!("{username}@example.com"),
                first_name: username.to_uppercase(),
                password_hash: hash_password(PASSWORD).unwrap(),
                user_type,
                is_superuser,
                is_active: true,
                ..Default::default()
            })
            .await
            .unwrap()
    }

    pub async fn seed_vehicle(&self, plate: &str, owner: &User, mechanic: &User) -> Vehicle {
        self.repos
            .vehicles
            .create(&NewVehicle {
                vehicle_plate_number: plate.into(),
                vehicle_type: "Truck".into(),
                vehicle_model: "Isuzu NPR".into(),
                vehicle_engine_number: format!("ENG-{plate}"),
                vehicle_color: "White".into(),
                vehicle_general_condition: "Good".into(),
                vehicle_owner_id: owner.id,
                mechanic_id: mechanic.id,
            })
            .await
            .unwrap()
    }

    /// Obtain a token pair through the API
    pub async fn token_pair(&self, username: &str) -> Value {
        let response = self
            .server
            .post("/token/request/")
            .json(&json!({ "username": username, "password": PASSWORD }))
            .await;
        response.assert_status_ok();
        response.json::<Value>()
    }

    /// Access token for a seeded account
    pub async fn login(&self, username: &str) -> String {
        self.token_pair(username).await["access"]
            .as_str()
            .unwrap()
            .to_owned()
    }

    pub async fn get(&self, path: &str, token: &str) -> TestResponse {
        self.server.get(path).authorization_bearer(token).await
    }

    pub async fn post(&self, path: &str, token: &str, body: Value) -> TestResponse {
        self.server
            .post(path)
            .authorization_bearer(token)
            .json(&body)
            .await
    }

    pub async fn put(&self, path: &str, token: &str, body: Value) -> TestResponse {
        self.server
            .put(path)
            .authorization_bearer(token)
            .json(&body)
            .await
    }

    pub async fn patch(&self, path: &str, token: &str, body: Value) -> TestResponse {
        self.server
            .patch(path)
            .authorization_bearer(token)
            .json(&body)
            .await
    }

    pub async fn delete(&self, path: &str, token: &str) -> TestResponse {
        self.server.delete(path).authorization_bearer(token).await
    }
}

/// Ids of the rows in a JSON array response
pub fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|row| row["id"].as_i64().unwrap())
        .collect()
}

/// Field names of a validation error body
pub fn error_fields(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .expect("expected field errors")
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_owned())
        .collect()
}
