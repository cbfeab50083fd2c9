//! # Fleet Server
//!
//! Vehicle fleet and maintenance tracking backend.
//!
//! This is the application entry point that initializes:
//! - Configuration loading
//! - Tracing/logging subsystem
//! - PostgreSQL pool (or the in-memory store)
//! - HTTP server

use anyhow::Result;
use tracing::info;

use fleet_server::config::Settings;
use fleet_server::startup::Application;
use fleet_server::telemetry::{init_tracing, LogFormat};

#[tokio::main]
async fn main() -> Result<()> {
    // Settings pick the log format, so they load before tracing starts
    let settings = Settings::load()?;
    init_tracing(LogFormat::parse(&settings.log_format));

    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        in_memory = settings.database.is_in_memory(),
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
