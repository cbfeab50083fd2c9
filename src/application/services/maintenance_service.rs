//! Maintenance Service
//!
//! Service events recorded against vehicles.

use std::sync::Arc;

use async_trait::async_trait;

use super::visible;
use crate::application::dto::request::{
    CreateVehicleServiceRequest, UpdateVehicleServiceRequest,
};
use crate::domain::{
    scope_for, NewVehicleService, Principal, Resource, ServiceTypeRepository,
    SubServiceRepository, VehicleRepository, VehicleService, VehicleServiceChanges,
    VehicleServiceRepository,
};
use crate::shared::error::AppError;
use crate::shared::validation::required;

#[async_trait]
pub trait MaintenanceService: Send + Sync {
    async fn list(&self, principal: &Principal) -> Result<Vec<VehicleService>, AppError>;
    async fn get(&self, principal: &Principal, id: i64) -> Result<VehicleService, AppError>;
    async fn create(
        &self,
        principal: &Principal,
        body: CreateVehicleServiceRequest,
    ) -> Result<VehicleService, AppError>;
    async fn update(
        &self,
        principal: &Principal,
        id: i64,
        body: UpdateVehicleServiceRequest,
    ) -> Result<VehicleService, AppError>;
    async fn delete(&self, principal: &Principal, id: i64) -> Result<(), AppError>;
}

pub struct MaintenanceServiceImpl {
    vehicle_repo: Arc<dyn VehicleRepository>,
    service_type_repo: Arc<dyn ServiceTypeRepository>,
    sub_service_repo: Arc<dyn SubServiceRepository>,
    record_repo: Arc<dyn VehicleServiceRepository>,
}

impl MaintenanceServiceImpl {
    pub fn new(
        vehicle_repo: Arc<dyn VehicleRepository>,
        service_type_repo: Arc<dyn ServiceTypeRepository>,
        sub_service_repo: Arc<dyn SubServiceRepository>,
        record_repo: Arc<dyn VehicleServiceRepository>,
    ) -> Self {
        Self {
            vehicle_repo,
            service_type_repo,
            sub_service_repo,
            record_repo,
        }
    }

    /// Check the references a record will hold once written.
    async fn check_references(
        &self,
        vehicle_id: i64,
        service_type_id: i64,
        sub_service_id: Option<i64>,
    ) -> Result<(), AppError> {
        if self.vehicle_repo.find_by_id(vehicle_id).await?.is_none() {
            return Err(AppError::dangling_reference("vehicle", vehicle_id));
        }
        if self.service_type_repo.find_by_id(service_type_id).await?.is_none() {
            return Err(AppError::dangling_reference("service_type", service_type_id));
        }

        let Some(sub_service_id) = sub_service_id else {
            return Ok(());
        };
        match self.sub_service_repo.find_by_id(sub_service_id).await? {
            None => Err(AppError::dangling_reference("sub_service", sub_service_id)),
            Some(sub) if sub.service_type_id != service_type_id => Err(AppError::invalid(
                "sub_service",
                "Sub-service does not belong to the selected service type.",
            )),
            Some(_) => Ok(()),
        }
    }
}

#[async_trait]
impl MaintenanceService for MaintenanceServiceImpl {
    async fn list(&self, principal: &Principal) -> Result<Vec<VehicleService>, AppError> {
        self.record_repo
            .list(scope_for(Resource::VehicleService, principal))
            .await
    }

    async fn get(&self, principal: &Principal, id: i64) -> Result<VehicleService, AppError> {
        let row = self.record_repo.find_by_id(id).await?;
        visible(row, scope_for(Resource::VehicleService, principal))
    }

    async fn create(
        &self,
        principal: &Principal,
        body: CreateVehicleServiceRequest,
    ) -> Result<VehicleService, AppError> {
        let vehicle_id = required("vehicle", body.vehicle)?;
        let service_type_id = required("service_type", body.service_type)?;
        let service_date = required("service_date", body.service_date)?;
        self.check_references(vehicle_id, service_type_id, body.sub_service)
            .await?;

        let new_record = NewVehicleService {
            vehicle_id,
            service_type_id,
            sub_service_id: body.sub_service,
            service_date,
            status: body.status.unwrap_or_default(),
            notes: body.notes,
        };

        let record = self.record_repo.create(&new_record).await?;
        tracing::info!(
            record_id = record.id,
            vehicle_id,
            created_by = principal.user_id,
            "Service record created"
        );
        Ok(record)
    }

    async fn update(
        &self,
        principal: &Principal,
        id: i64,
        body: UpdateVehicleServiceRequest,
    ) -> Result<VehicleService, AppError> {
        let mut record = self.get(principal, id).await?;
        record.apply(VehicleServiceChanges {
            vehicle_id: body.vehicle,
            service_type_id: body.service_type,
            sub_service_id: body.sub_service,
            service_date: body.service_date,
            status: body.status,
            notes: body.notes,
        });
        self.check_references(record.vehicle_id, record.service_type_id, record.sub_service_id)
            .await?;

        self.record_repo.update(&record).await
    }

    async fn delete(&self, principal: &Principal, id: i64) -> Result<(), AppError> {
        let record = self.get(principal, id).await?;
        self.record_repo.delete(record.id).await
    }
}
