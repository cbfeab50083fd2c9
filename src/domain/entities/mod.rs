//! # Domain Entities
//!
//! Core domain entities of the fleet backend. All entities map directly to
//! their corresponding database tables.
//!
//! ## Core Entities
//!
//! - **User**: Account with a role flag (mechanic or owner) and superuser flag
//! - **Vehicle**: A fleet vehicle with an owner and an assigned mechanic
//! - **VehiclePart**: A component of a vehicle serviced by a mechanic
//!
//! ## Service Catalogue
//!
//! - **ServiceType**: Named category of maintenance work
//! - **SubService**: Task within a service type
//! - **VehicleService**: A service event performed on a vehicle
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod user;
mod service_type;
mod sub_service;
mod vehicle;
mod vehicle_part;
mod vehicle_service;

pub use user::{NewUser, User, UserChanges, UserRepository, UserType};

pub use service_type::{NewServiceType, ServiceType, ServiceTypeChanges, ServiceTypeRepository};

pub use sub_service::{NewSubService, SubService, SubServiceChanges, SubServiceRepository};

pub use vehicle::{NewVehicle, Vehicle, VehicleChanges, VehicleRepository};

pub use vehicle_part::{NewVehiclePart, VehiclePart, VehiclePartChanges, VehiclePartRepository};

pub use vehicle_service::{
    NewVehicleService, ServiceStatus, VehicleService, VehicleServiceChanges,
    VehicleServiceRepository,
};

#[cfg(test)]
pub use user::MockUserRepository;
#[cfg(test)]
pub use service_type::MockServiceTypeRepository;
#[cfg(test)]
pub use sub_service::MockSubServiceRepository;
#[cfg(test)]
pub use vehicle::MockVehicleRepository;
#[cfg(test)]
pub use vehicle_part::MockVehiclePartRepository;
#[cfg(test)]
pub use vehicle_service::MockVehicleServiceRepository;
