//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;

use crate::application::services::{
    hash_password, AuthServiceImpl, CatalogServiceImpl, FleetServiceImpl, MaintenanceServiceImpl,
    ReportServiceImpl, UserServiceImpl,
};
use crate::config::{BootstrapSettings, Settings};
use crate::domain::{NewUser, UserType};
use crate::infrastructure::database;
use crate::infrastructure::repositories::Repositories;
use crate::presentation::http::{handlers::health, routes};
use crate::presentation::middleware::{create_cors_layer, create_trace_layer};
use crate::shared::error::AppError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(repos: Repositories, settings: Settings) -> Self {
        Self {
            repos,
            settings: Arc::new(settings),
        }
    }

    pub fn auth_service(&self) -> AuthServiceImpl {
        AuthServiceImpl::new(self.repos.users.clone(), self.settings.jwt.clone())
    }

    pub fn user_service(&self) -> UserServiceImpl {
        UserServiceImpl::new(self.repos.users.clone())
    }

    pub fn catalog_service(&self) -> CatalogServiceImpl {
        CatalogServiceImpl::new(
            self.repos.service_types.clone(),
            self.repos.sub_services.clone(),
        )
    }

    pub fn fleet_service(&self) -> FleetServiceImpl {
        FleetServiceImpl::new(
            self.repos.users.clone(),
            self.repos.vehicles.clone(),
            self.repos.vehicle_parts.clone(),
        )
    }

    pub fn maintenance_service(&self) -> MaintenanceServiceImpl {
        MaintenanceServiceImpl::new(
            self.repos.vehicles.clone(),
            self.repos.service_types.clone(),
            self.repos.sub_services.clone(),
            self.repos.vehicle_services.clone(),
        )
    }

    pub fn report_service(&self) -> ReportServiceImpl {
        ReportServiceImpl::new(
            self.repos.users.clone(),
            self.repos.vehicles.clone(),
            self.repos.vehicle_parts.clone(),
        )
    }
}

/// Full router with the outer middleware chain: trace, then CORS.
pub fn build_router(state: AppState) -> Router {
    let cors = create_cors_layer(&state.settings.cors);

    routes::create_router(state)
        .layer(cors)
        .layer(create_trace_layer())
}

/// Create the configured superuser unless the username is already taken.
pub async fn bootstrap_superuser(
    repos: &Repositories,
    bootstrap: &BootstrapSettings,
) -> Result<(), AppError> {
    if repos
        .users
        .find_by_username(&bootstrap.username)
        .await?
        .is_some()
    {
        tracing::debug!(username = %bootstrap.username, "Bootstrap superuser already present");
        return Ok(());
    }

    let user = repos
        .users
        .create(&NewUser {
            username: bootstrap.username.clone(),
            email: bootstrap.email.clone(),
            password_hash: hash_password(&bootstrap.password)?,
            user_type: UserType::Owner,
            is_superuser: true,
            is_active: true,
            ..Default::default()
        })
        .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Bootstrap superuser created");
    Ok(())
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        let repos = if settings.database.is_in_memory() {
            tracing::warn!("Using the in-memory store; data is lost on shutdown");
            Repositories::in_memory()
        } else {
            let pool = database::create_pool(&settings.database).await?;
            tracing::info!("Database connection pool created");

            if settings.database.run_migrations {
                database::run_migrations(&pool).await?;
                tracing::info!("Database migrations applied");
            }
            Repositories::postgres(pool)
        };

        if let Some(bootstrap) = &settings.bootstrap {
            bootstrap_superuser(&repos, bootstrap).await?;
        }

        let listener = TcpListener::bind(settings.server_addr()).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        health::init_server_start();
        let router = build_router(AppState::new(repos, settings));

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("Server stopped");
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
