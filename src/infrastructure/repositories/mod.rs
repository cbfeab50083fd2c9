//! Repository Implementations
//!
//! Concrete implementations of the domain repository traits.
//!
//! ## Backends
//!
//! - **PostgreSQL** (`Pg*Repository`) - one struct per table over a shared `PgPool`
//! - **In-memory** ([`MemoryStore`]) - a single store implementing every trait
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use fleet_server::infrastructure::repositories::Repositories;
//!
//! let repos = Repositories::postgres(pool);
//! let vehicles = repos.vehicles.list(Scope::All).await?;
//! ```

use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::{
    ServiceTypeRepository, SubServiceRepository, UserRepository, VehiclePartRepository,
    VehicleRepository, VehicleServiceRepository,
};
use crate::infrastructure::database;
use crate::shared::error::AppError;

pub mod memory;
pub mod service_type_repository;
pub mod sub_service_repository;
pub mod user_repository;
pub mod vehicle_part_repository;
pub mod vehicle_repository;
pub mod vehicle_service_repository;

pub use memory::MemoryStore;
pub use service_type_repository::PgServiceTypeRepository;
pub use sub_service_repository::PgSubServiceRepository;
pub use user_repository::PgUserRepository;
pub use vehicle_part_repository::PgVehiclePartRepository;
pub use vehicle_repository::PgVehicleRepository;
pub use vehicle_service_repository::PgVehicleServiceRepository;

/// Unique-constraint violations reported as field errors.
pub(crate) const USERNAME_TAKEN: (&str, &str) =
    ("username", "A user with that username already exists.");
pub(crate) const PLATE_TAKEN: (&str, &str) = (
    "vehicle_plate_number",
    "vehicle with this vehicle plate number already exists.",
);

/// A sub-service cannot leave the service type of records that use it.
pub(crate) const SUB_SERVICE_IN_USE: (&str, &str) = (
    "service_type",
    "Sub-service is used by service records of its current service type.",
);

#[derive(Clone)]
enum Backend {
    Postgres(PgPool),
    Memory,
}

/// Every repository the application needs, behind trait objects.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub service_types: Arc<dyn ServiceTypeRepository>,
    pub sub_services: Arc<dyn SubServiceRepository>,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub vehicle_parts: Arc<dyn VehiclePartRepository>,
    pub vehicle_services: Arc<dyn VehicleServiceRepository>,
    backend: Backend,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            service_types: Arc::new(PgServiceTypeRepository::new(pool.clone())),
            sub_services: Arc::new(PgSubServiceRepository::new(pool.clone())),
            vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
            vehicle_parts: Arc::new(PgVehiclePartRepository::new(pool.clone())),
            vehicle_services: Arc::new(PgVehicleServiceRepository::new(pool.clone())),
            backend: Backend::Postgres(pool),
        }
    }

    pub fn in_memory() -> Self {
        Self::from_store(MemoryStore::new())
    }

    pub fn from_store(store: MemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            service_types: Arc::new(store.clone()),
            sub_services: Arc::new(store.clone()),
            vehicles: Arc::new(store.clone()),
            vehicle_parts: Arc::new(store.clone()),
            vehicle_services: Arc::new(store),
            backend: Backend::Memory,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory => "memory",
        }
    }

    /// Readiness check against the underlying store.
    pub async fn ping(&self) -> Result<(), AppError> {
        match &self.backend {
            Backend::Postgres(pool) => database::ping(pool)
                .await
                .map_err(|e| AppError::Unavailable(format!("database: {}", e))),
            Backend::Memory => Ok(()),
        }
    }
}
