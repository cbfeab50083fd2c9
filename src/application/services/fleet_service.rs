//! Fleet Service
//!
//! Vehicles and the parts fitted to them. Non-superuser mechanics only reach
//! rows assigned to them; other non-superusers reach nothing. Creation is
//! open to any authenticated caller.

use std::sync::Arc;

use async_trait::async_trait;

use super::visible;
use crate::application::dto::request::{
    CreateVehiclePartRequest, CreateVehicleRequest, UpdateVehiclePartRequest, UpdateVehicleRequest,
};
use crate::domain::{
    scope_for, NewVehicle, NewVehiclePart, Principal, Resource, UserRepository, Vehicle,
    VehicleChanges, VehiclePart, VehiclePartChanges, VehiclePartRepository, VehicleRepository,
};
use crate::shared::error::AppError;
use crate::shared::validation::required;

#[async_trait]
pub trait FleetService: Send + Sync {
    async fn list_vehicles(&self, principal: &Principal) -> Result<Vec<Vehicle>, AppError>;
    async fn get_vehicle(&self, principal: &Principal, id: i64) -> Result<Vehicle, AppError>;
    async fn create_vehicle(
        &self,
        principal: &Principal,
        body: CreateVehicleRequest,
    ) -> Result<Vehicle, AppError>;
    async fn update_vehicle(
        &self,
        principal: &Principal,
        id: i64,
        body: UpdateVehicleRequest,
    ) -> Result<Vehicle, AppError>;
    async fn delete_vehicle(&self, principal: &Principal, id: i64) -> Result<(), AppError>;

    async fn list_parts(&self, principal: &Principal) -> Result<Vec<VehiclePart>, AppError>;
    async fn get_part(&self, principal: &Principal, id: i64) -> Result<VehiclePart, AppError>;
    async fn create_part(
        &self,
        principal: &Principal,
        body: CreateVehiclePartRequest,
    ) -> Result<VehiclePart, AppError>;
    async fn update_part(
        &self,
        principal: &Principal,
        id: i64,
        body: UpdateVehiclePartRequest,
    ) -> Result<VehiclePart, AppError>;
    async fn delete_part(&self, principal: &Principal, id: i64) -> Result<(), AppError>;
}

pub struct FleetServiceImpl {
    user_repo: Arc<dyn UserRepository>,
    vehicle_repo: Arc<dyn VehicleRepository>,
    part_repo: Arc<dyn VehiclePartRepository>,
}

impl FleetServiceImpl {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        vehicle_repo: Arc<dyn VehicleRepository>,
        part_repo: Arc<dyn VehiclePartRepository>,
    ) -> Self {
        Self {
            user_repo,
            vehicle_repo,
            part_repo,
        }
    }

    async fn require_user(&self, field: &str, id: Option<i64>) -> Result<(), AppError> {
        let Some(id) = id else { return Ok(()) };
        match self.user_repo.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::dangling_reference(field, id)),
        }
    }

    async fn require_vehicle(&self, id: Option<i64>) -> Result<(), AppError> {
        let Some(id) = id else { return Ok(()) };
        match self.vehicle_repo.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::dangling_reference("vehicle", id)),
        }
    }
}

#[async_trait]
impl FleetService for FleetServiceImpl {
    async fn list_vehicles(&self, principal: &Principal) -> Result<Vec<Vehicle>, AppError> {
        self.vehicle_repo
            .list(scope_for(Resource::Vehicle, principal))
            .await
    }

    async fn get_vehicle(&self, principal: &Principal, id: i64) -> Result<Vehicle, AppError> {
        let row = self.vehicle_repo.find_by_id(id).await?;
        visible(row, scope_for(Resource::Vehicle, principal))
    }

    async fn create_vehicle(
        &self,
        principal: &Principal,
        body: CreateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        let vehicle_owner_id = required("vehicle_owner", body.vehicle_owner)?;
        let mechanic_id = required("mechanic", body.mechanic)?;
        self.require_user("vehicle_owner", Some(vehicle_owner_id)).await?;
        self.require_user("mechanic", Some(mechanic_id)).await?;

        let new_vehicle = NewVehicle {
            vehicle_plate_number: required("vehicle_plate_number", body.vehicle_plate_number)?,
            vehicle_type: required("vehicle_type", body.vehicle_type)?,
            vehicle_model: required("vehicle_model", body.vehicle_model)?,
            vehicle_engine_number: required("vehicle_engine_number", body.vehicle_engine_number)?,
            vehicle_color: required("vehicle_color", body.vehicle_color)?,
            vehicle_general_condition: required(
                "vehicle_general_condition",
                body.vehicle_general_condition,
            )?,
            vehicle_owner_id,
            mechanic_id,
        };

        let vehicle = self.vehicle_repo.create(&new_vehicle).await?;
        tracing::info!(
            vehicle_id = vehicle.id,
            mechanic_id,
            created_by = principal.user_id,
            "Vehicle registered"
        );
        Ok(vehicle)
    }

    async fn update_vehicle(
        &self,
        principal: &Principal,
        id: i64,
        body: UpdateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        let mut vehicle = self.get_vehicle(principal, id).await?;
        self.require_user("vehicle_owner", body.vehicle_owner).await?;
        self.require_user("mechanic", body.mechanic).await?;

        vehicle.apply(VehicleChanges {
            vehicle_plate_number: body.vehicle_plate_number,
            vehicle_type: body.vehicle_type,
            vehicle_model: body.vehicle_model,
            vehicle_engine_number: body.vehicle_engine_number,
            vehicle_color: body.vehicle_color,
            vehicle_general_condition: body.vehicle_general_condition,
            vehicle_owner_id: body.vehicle_owner,
            mechanic_id: body.mechanic,
        });
        self.vehicle_repo.update(&vehicle).await
    }

    async fn delete_vehicle(&self, principal: &Principal, id: i64) -> Result<(), AppError> {
        let vehicle = self.get_vehicle(principal, id).await?;
        self.vehicle_repo.delete(vehicle.id).await?;
        tracing::info!(vehicle_id = id, deleted_by = principal.user_id, "Vehicle deleted");
        Ok(())
    }

    async fn list_parts(&self, principal: &Principal) -> Result<Vec<VehiclePart>, AppError> {
        self.part_repo
            .list(scope_for(Resource::VehiclePart, principal))
            .await
    }

    async fn get_part(&self, principal: &Principal, id: i64) -> Result<VehiclePart, AppError> {
        let row = self.part_repo.find_by_id(id).await?;
        visible(row, scope_for(Resource::VehiclePart, principal))
    }

    async fn create_part(
        &self,
        principal: &Principal,
        body: CreateVehiclePartRequest,
    ) -> Result<VehiclePart, AppError> {
        let vehicle_id = required("vehicle", body.vehicle)?;
        let mechanic_id = required("mechanic", body.mechanic)?;
        self.require_vehicle(Some(vehicle_id)).await?;
        self.require_user("mechanic", Some(mechanic_id)).await?;

        let new_part = NewVehiclePart {
            vehicle_id,
            mechanic_id,
            part_name: required("part_name", body.part_name)?,
            part_condition: required("part_condition", body.part_condition)?,
            part_status: required("part_status", body.part_status)?,
            notes: body.notes,
        };

        let part = self.part_repo.create(&new_part).await?;
        tracing::info!(
            part_id = part.id,
            vehicle_id,
            created_by = principal.user_id,
            "Vehicle part recorded"
        );
        Ok(part)
    }

    async fn update_part(
        &self,
        principal: &Principal,
        id: i64,
        body: UpdateVehiclePartRequest,
    ) -> Result<VehiclePart, AppError> {
        let mut part = self.get_part(principal, id).await?;
        self.require_vehicle(body.vehicle).await?;
        self.require_user("mechanic", body.mechanic).await?;

        part.apply(VehiclePartChanges {
            vehicle_id: body.vehicle,
            mechanic_id: body.mechanic,
            part_name: body.part_name,
            part_condition: body.part_condition,
            part_status: body.part_status,
            notes: body.notes,
        });
        self.part_repo.update(&part).await
    }

    async fn delete_part(&self, principal: &Principal, id: i64) -> Result<(), AppError> {
        let part = self.get_part(principal, id).await?;
        self.part_repo.delete(part.id).await
    }
}
