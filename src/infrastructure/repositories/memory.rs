//! In-Memory Store
//!
//! Process-local backend implementing every repository trait, selected with
//! `database.url = "memory://"`. It mirrors the PostgreSQL schema's unique
//! constraints, foreign keys and cascades so that both backends answer the
//! same way.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use super::{PLATE_TAKEN, SUB_SERVICE_IN_USE, USERNAME_TAKEN};
use crate::domain::services::access_policy::Owned;
use crate::domain::{
    NewServiceType, NewSubService, NewUser, NewVehicle, NewVehiclePart, NewVehicleService,
    Scope, ServiceType, ServiceTypeRepository, SubService, SubServiceRepository, User,
    UserRepository, Vehicle, VehiclePart, VehiclePartRepository, VehicleRepository,
    VehicleService, VehicleServiceRepository,
};
use crate::shared::error::AppError;

const MISSING_REFERENCE: &str = "Referenced object does not exist.";

/// Rows keyed by id plus the id sequence.
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone + Owned> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn scoped(&self, scope: Scope) -> Vec<T> {
        self.rows
            .values()
            .filter(|row| scope.admits(*row))
            .cloned()
            .collect()
    }

    /// Foreign-key check.
    fn require(&self, field: &str, id: i64) -> Result<(), AppError> {
        if self.rows.contains_key(&id) {
            Ok(())
        } else {
            Err(AppError::invalid(field, MISSING_REFERENCE))
        }
    }

    fn replace(&mut self, id: i64, row: T, what: &str) -> Result<T, AppError> {
        match self.rows.get_mut(&id) {
            Some(slot) => {
                *slot = row.clone();
                Ok(row)
            }
            None => Err(AppError::NotFound(format!("{} with id {} not found", what, id))),
        }
    }

    fn remove(&mut self, id: i64, what: &str) -> Result<(), AppError> {
        self.rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("{} with id {} not found", what, id)))
    }
}

#[derive(Default)]
struct Tables {
    users: Table<User>,
    service_types: Table<ServiceType>,
    sub_services: Table<SubService>,
    vehicles: Table<Vehicle>,
    vehicle_parts: Table<VehiclePart>,
    vehicle_services: Table<VehicleService>,
}

impl Tables {
    fn username_taken(&self, username: &str, except: Option<i64>) -> bool {
        self.users
            .rows
            .values()
            .any(|u| u.username == username && Some(u.id) != except)
    }

    fn plate_taken(&self, plate: &str, except: Option<i64>) -> bool {
        self.vehicles
            .rows
            .values()
            .any(|v| v.vehicle_plate_number == plate && Some(v.id) != except)
    }

    fn check_vehicle_refs(&self, owner_id: i64, mechanic_id: i64) -> Result<(), AppError> {
        self.users.require("vehicle_owner", owner_id)?;
        self.users.require("mechanic", mechanic_id)
    }

    fn check_part_refs(&self, vehicle_id: i64, mechanic_id: i64) -> Result<(), AppError> {
        self.vehicles.require("vehicle", vehicle_id)?;
        self.users.require("mechanic", mechanic_id)
    }

    fn check_record_refs(
        &self,
        vehicle_id: i64,
        service_type_id: i64,
        sub_service_id: Option<i64>,
    ) -> Result<(), AppError> {
        self.vehicles.require("vehicle", vehicle_id)?;
        self.service_types.require("service_type", service_type_id)?;
        match sub_service_id {
            Some(id) => self.sub_services.require("sub_service", id),
            None => Ok(()),
        }
    }

    // ON DELETE CASCADE / SET NULL, as declared in the schema.

    fn cascade_vehicle(&mut self, vehicle_id: i64) {
        self.vehicle_parts.rows.retain(|_, p| p.vehicle_id != vehicle_id);
        self.vehicle_services
            .rows
            .retain(|_, s| s.vehicle_id != vehicle_id);
    }

    fn cascade_user(&mut self, user_id: i64) {
        let vehicle_ids: Vec<i64> = self
            .vehicles
            .rows
            .values()
            .filter(|v| v.vehicle_owner_id == user_id || v.mechanic_id == user_id)
            .map(|v| v.id)
            .collect();
        for vehicle_id in vehicle_ids {
            self.vehicles.rows.remove(&vehicle_id);
            self.cascade_vehicle(vehicle_id);
        }
        self.vehicle_parts.rows.retain(|_, p| p.mechanic_id != user_id);
    }

    fn cascade_sub_service(&mut self, sub_service_id: i64) {
        for record in self.vehicle_services.rows.values_mut() {
            if record.sub_service_id == Some(sub_service_id) {
                record.sub_service_id = None;
            }
        }
    }

    fn cascade_service_type(&mut self, service_type_id: i64) {
        self.vehicle_services
            .rows
            .retain(|_, s| s.service_type_id != service_type_id);
        let sub_service_ids: Vec<i64> = self
            .sub_services
            .rows
            .values()
            .filter(|s| s.service_type_id == service_type_id)
            .map(|s| s.id)
            .collect();
        for sub_service_id in sub_service_ids {
            self.sub_services.rows.remove(&sub_service_id);
            self.cascade_sub_service(sub_service_id);
        }
    }
}

/// Shared handle to the in-memory tables. Clones see the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn list(&self, scope: Scope) -> Result<Vec<User>, AppError> {
        Ok(self.tables.read().users.scoped(scope))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.tables.read().users.get(id))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .tables
            .read()
            .users
            .rows
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write();
        if tables.username_taken(&user.username, None) {
            let (field, message) = USERNAME_TAKEN;
            return Err(AppError::invalid(field, message));
        }

        let id = tables.users.next_id();
        let user = user.clone().into_user(id, Utc::now());
        tables.users.rows.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let mut tables = self.tables.write();
        if tables.username_taken(&user.username, Some(user.id)) {
            let (field, message) = USERNAME_TAKEN;
            return Err(AppError::invalid(field, message));
        }
        tables.users.replace(user.id, user.clone(), "User")
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tables = self.tables.write();
        tables.users.remove(id, "User")?;
        tables.cascade_user(id);
        Ok(())
    }
}

#[async_trait]
impl ServiceTypeRepository for MemoryStore {
    async fn list(&self, scope: Scope) -> Result<Vec<ServiceType>, AppError> {
        Ok(self.tables.read().service_types.scoped(scope))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ServiceType>, AppError> {
        Ok(self.tables.read().service_types.get(id))
    }

    async fn create(&self, service_type: &NewServiceType) -> Result<ServiceType, AppError> {
        let mut tables = self.tables.write();
        let id = tables.service_types.next_id();
        let service_type = service_type.clone().into_service_type(id, Utc::now());
        tables.service_types.rows.insert(id, service_type.clone());
        Ok(service_type)
    }

    async fn update(&self, service_type: &ServiceType) -> Result<ServiceType, AppError> {
        self.tables
            .write()
            .service_types
            .replace(service_type.id, service_type.clone(), "Service type")
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tables = self.tables.write();
        tables.service_types.remove(id, "Service type")?;
        tables.cascade_service_type(id);
        Ok(())
    }
}

#[async_trait]
impl SubServiceRepository for MemoryStore {
    async fn list(&self, scope: Scope) -> Result<Vec<SubService>, AppError> {
        Ok(self.tables.read().sub_services.scoped(scope))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<SubService>, AppError> {
        Ok(self.tables.read().sub_services.get(id))
    }

    async fn create(&self, sub_service: &NewSubService) -> Result<SubService, AppError> {
        let mut tables = self.tables.write();
        tables
            .service_types
            .require("service_type", sub_service.service_type_id)?;

        let id = tables.sub_services.next_id();
        let sub_service = sub_service.clone().into_sub_service(id, Utc::now());
        tables.sub_services.rows.insert(id, sub_service.clone());
        Ok(sub_service)
    }

    async fn update(&self, sub_service: &SubService) -> Result<SubService, AppError> {
        let mut tables = self.tables.write();
        tables
            .service_types
            .require("service_type", sub_service.service_type_id)?;
        let in_use = tables.vehicle_services.rows.values().any(|record| {
            record.sub_service_id == Some(sub_service.id)
                && record.service_type_id != sub_service.service_type_id
        });
        if in_use {
            let (field, message) = SUB_SERVICE_IN_USE;
            return Err(AppError::invalid(field, message));
        }
        tables
            .sub_services
            .replace(sub_service.id, sub_service.clone(), "Sub-service")
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tables = self.tables.write();
        tables.sub_services.remove(id, "Sub-service")?;
        tables.cascade_sub_service(id);
        Ok(())
    }
}

#[async_trait]
impl VehicleRepository for MemoryStore {
    async fn list(&self, scope: Scope) -> Result<Vec<Vehicle>, AppError> {
        Ok(self.tables.read().vehicles.scoped(scope))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Vehicle>, AppError> {
        Ok(self.tables.read().vehicles.get(id))
    }

    async fn create(&self, vehicle: &NewVehicle) -> Result<Vehicle, AppError> {
        let mut tables = self.tables.write();
        if tables.plate_taken(&vehicle.vehicle_plate_number, None) {
            let (field, message) = PLATE_TAKEN;
            return Err(AppError::invalid(field, message));
        }
        tables.check_vehicle_refs(vehicle.vehicle_owner_id, vehicle.mechanic_id)?;

        let id = tables.vehicles.next_id();
        let vehicle = vehicle.clone().into_vehicle(id, Utc::now());
        tables.vehicles.rows.insert(id, vehicle.clone());
        Ok(vehicle)
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        let mut tables = self.tables.write();
        if tables.plate_taken(&vehicle.vehicle_plate_number, Some(vehicle.id)) {
            let (field, message) = PLATE_TAKEN;
            return Err(AppError::invalid(field, message));
        }
        tables.check_vehicle_refs(vehicle.vehicle_owner_id, vehicle.mechanic_id)?;

        let mut vehicle = vehicle.clone();
        vehicle.updated_at = Utc::now();
        tables.vehicles.replace(vehicle.id, vehicle, "Vehicle")
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tables = self.tables.write();
        tables.vehicles.remove(id, "Vehicle")?;
        tables.cascade_vehicle(id);
        Ok(())
    }
}

#[async_trait]
impl VehiclePartRepository for MemoryStore {
    async fn list(&self, scope: Scope) -> Result<Vec<VehiclePart>, AppError> {
        Ok(self.tables.read().vehicle_parts.scoped(scope))
    }

    async fn list_for_vehicle(&self, vehicle_id: i64) -> Result<Vec<VehiclePart>, AppError> {
        Ok(self
            .tables
            .read()
            .vehicle_parts
            .rows
            .values()
            .filter(|p| p.vehicle_id == vehicle_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<VehiclePart>, AppError> {
        Ok(self.tables.read().vehicle_parts.get(id))
    }

    async fn create(&self, part: &NewVehiclePart) -> Result<VehiclePart, AppError> {
        let mut tables = self.tables.write();
        tables.check_part_refs(part.vehicle_id, part.mechanic_id)?;

        let id = tables.vehicle_parts.next_id();
        let part = part.clone().into_vehicle_part(id, Utc::now());
        tables.vehicle_parts.rows.insert(id, part.clone());
        Ok(part)
    }

    async fn update(&self, part: &VehiclePart) -> Result<VehiclePart, AppError> {
        let mut tables = self.tables.write();
        tables.check_part_refs(part.vehicle_id, part.mechanic_id)?;

        let mut part = part.clone();
        part.updated_at = Utc::now();
        tables.vehicle_parts.replace(part.id, part, "Vehicle part")
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.tables.write().vehicle_parts.remove(id, "Vehicle part")
    }
}

#[async_trait]
impl VehicleServiceRepository for MemoryStore {
    async fn list(&self, scope: Scope) -> Result<Vec<VehicleService>, AppError> {
        Ok(self.tables.read().vehicle_services.scoped(scope))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<VehicleService>, AppError> {
        Ok(self.tables.read().vehicle_services.get(id))
    }

    async fn create(&self, record: &NewVehicleService) -> Result<VehicleService, AppError> {
        let mut tables = self.tables.write();
        tables.check_record_refs(record.vehicle_id, record.service_type_id, record.sub_service_id)?;

        let id = tables.vehicle_services.next_id();
        let record = record.clone().into_vehicle_service(id, Utc::now());
        tables.vehicle_services.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, record: &VehicleService) -> Result<VehicleService, AppError> {
        let mut tables = self.tables.write();
        tables.check_record_refs(record.vehicle_id, record.service_type_id, record.sub_service_id)?;

        let mut record = record.clone();
        record.updated_at = Utc::now();
        tables
            .vehicle_services
            .replace(record.id, record, "Vehicle service")
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.tables
            .write()
            .vehicle_services
            .remove(id, "Vehicle service")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use crate::domain::{ServiceStatus, UserType};

    fn new_user(username: &str, user_type: UserType) -> NewUser {
        NewUser {
            username: username.into(),
            password_hash: "hash".into(),
            user_type,
            is_active: true,
            ..Default::default()
        }
    }

    fn new_vehicle(plate: &str, owner: i64, mechanic: i64) -> NewVehicle {
        NewVehicle {
            vehicle_plate_number: plate.into(),
            vehicle_type: "Van".into(),
            vehicle_model: "Transit".into(),
            vehicle_engine_number: format!("ENG-{plate}"),
            vehicle_color: "Red".into(),
            vehicle_general_condition: "Fair".into(),
            vehicle_owner_id: owner,
            mechanic_id: mechanic,
        }
    }

    async fn seed(store: &MemoryStore) -> (User, User, Vehicle) {
        let mechanic = UserRepository::create(store, &new_user("mech", UserType::Mechanic))
            .await
            .unwrap();
        let owner = UserRepository::create(store, &new_user("owner", UserType::Owner))
            .await
            .unwrap();
        let vehicle = VehicleRepository::create(store, &new_vehicle("KAA 1", owner.id, mechanic.id))
            .await
            .unwrap();
        (mechanic, owner, vehicle)
    }

    #[tokio::test]
    async fn test_ids_are_sequential_per_table() {
        let store = MemoryStore::new();
        let (mechanic, owner, vehicle) = seed(&store).await;

        assert_eq!(mechanic.id, 1);
        assert_eq!(owner.id, 2);
        assert_eq!(vehicle.id, 1);
    }

    #[tokio::test]
    async fn test_scoped_listing() {
        let store = MemoryStore::new();
        let (mechanic, owner, _) = seed(&store).await;
        VehicleRepository::create(&store, &new_vehicle("KAA 2", owner.id, owner.id))
            .await
            .unwrap();

        let all = VehicleRepository::list(&store, Scope::All).await.unwrap();
        let mine = VehicleRepository::list(&store, Scope::OwnedBy(mechanic.id))
            .await
            .unwrap();
        let none = VehicleRepository::list(&store, Scope::Nothing).await.unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].vehicle_plate_number, "KAA 1");
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_unique_username_and_plate() {
        let store = MemoryStore::new();
        let (mechanic, owner, _) = seed(&store).await;

        let err = UserRepository::create(&store, &new_user("mech", UserType::Owner))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref e) if e[0].field == "username"));

        let err = VehicleRepository::create(&store, &new_vehicle("KAA 1", owner.id, mechanic.id))
            .await
            .unwrap_err();
        assert!(
            matches!(err, AppError::Validation(ref e) if e[0].field == "vehicle_plate_number")
        );
    }

    #[tokio::test]
    async fn test_foreign_keys_are_checked() {
        let store = MemoryStore::new();

        let err = SubServiceRepository::create(
            &store,
            &NewSubService {
                service_type_id: 99,
                name: "Oil change".into(),
                description: None,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Validation(ref e) if e[0].field == "service_type"));
        assert!(SubServiceRepository::list(&store, Scope::All)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_deleting_user_cascades() {
        let store = MemoryStore::new();
        let (mechanic, _, vehicle) = seed(&store).await;
        VehiclePartRepository::create(
            &store,
            &NewVehiclePart {
                vehicle_id: vehicle.id,
                mechanic_id: mechanic.id,
                part_name: "Clutch".into(),
                part_condition: "Worn".into(),
                part_status: "Ordered".into(),
                notes: None,
            },
        )
        .await
        .unwrap();

        UserRepository::delete(&store, mechanic.id).await.unwrap();

        assert!(VehicleRepository::list(&store, Scope::All)
            .await
            .unwrap()
            .is_empty());
        assert!(VehiclePartRepository::list(&store, Scope::All)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_deleting_sub_service_clears_records() {
        let store = MemoryStore::new();
        let (_, _, vehicle) = seed(&store).await;
        let service_type = ServiceTypeRepository::create(
            &store,
            &NewServiceType {
                name: "Engine".into(),
                description: None,
            },
        )
        .await
        .unwrap();
        let sub_service = SubServiceRepository::create(
            &store,
            &NewSubService {
                service_type_id: service_type.id,
                name: "Oil change".into(),
                description: None,
            },
        )
        .await
        .unwrap();
        let record = VehicleServiceRepository::create(
            &store,
            &NewVehicleService {
                vehicle_id: vehicle.id,
                service_type_id: service_type.id,
                sub_service_id: Some(sub_service.id),
                service_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                status: ServiceStatus::Pending,
                notes: None,
            },
        )
        .await
        .unwrap();

        SubServiceRepository::delete(&store, sub_service.id)
            .await
            .unwrap();

        let record = VehicleServiceRepository::find_by_id(&store, record.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.sub_service_id, None);
    }

    #[tokio::test]
    async fn test_sub_service_in_use_keeps_its_service_type() {
        let store = MemoryStore::new();
        let (_, _, vehicle) = seed(&store).await;
        let mut service_types = Vec::new();
        for name in ["Engine", "Brakes"] {
            let created = ServiceTypeRepository::create(
                &store,
                &NewServiceType {
                    name: name.into(),
                    description: None,
                },
            )
            .await
            .unwrap();
            service_types.push(created);
        }
        let sub_service = SubServiceRepository::create(
            &store,
            &NewSubService {
                service_type_id: service_types[0].id,
                name: "Oil change".into(),
                description: None,
            },
        )
        .await
        .unwrap();
        VehicleServiceRepository::create(
            &store,
            &NewVehicleService {
                vehicle_id: vehicle.id,
                service_type_id: service_types[0].id,
                sub_service_id: Some(sub_service.id),
                service_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                status: ServiceStatus::Pending,
                notes: None,
            },
        )
        .await
        .unwrap();

        let mut moved = sub_service.clone();
        moved.service_type_id = service_types[1].id;
        let err = SubServiceRepository::update(&store, &moved)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let mut renamed = sub_service.clone();
        renamed.name = "Oil and filter".into();
        SubServiceRepository::update(&store, &renamed).await.unwrap();

        let stored = SubServiceRepository::find_by_id(&store, sub_service.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.service_type_id, service_types[0].id);
        assert_eq!(stored.name, "Oil and filter");
    }

    #[tokio::test]
    async fn test_missing_rows() {
        let store = MemoryStore::new();

        assert!(matches!(
            VehicleRepository::delete(&store, 5).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(UserRepository::find_by_id(&store, 5).await.unwrap(), None);
    }
}
