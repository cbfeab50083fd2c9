//! Catalog Service
//!
//! Service types and the sub-services grouped under them.

use std::sync::Arc;

use async_trait::async_trait;

use super::visible;
use crate::application::dto::request::{
    CreateServiceTypeRequest, CreateSubServiceRequest, UpdateServiceTypeRequest,
    UpdateSubServiceRequest,
};
use crate::domain::{
    scope_for, NewServiceType, NewSubService, Principal, Resource, ServiceType,
    ServiceTypeChanges, ServiceTypeRepository, SubService, SubServiceChanges,
    SubServiceRepository,
};
use crate::shared::error::AppError;
use crate::shared::validation::required;

#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn list_service_types(&self, principal: &Principal) -> Result<Vec<ServiceType>, AppError>;
    async fn get_service_type(&self, principal: &Principal, id: i64) -> Result<ServiceType, AppError>;
    async fn create_service_type(
        &self,
        principal: &Principal,
        body: CreateServiceTypeRequest,
    ) -> Result<ServiceType, AppError>;
    async fn update_service_type(
        &self,
        principal: &Principal,
        id: i64,
        body: UpdateServiceTypeRequest,
    ) -> Result<ServiceType, AppError>;
    async fn delete_service_type(&self, principal: &Principal, id: i64) -> Result<(), AppError>;

    async fn list_sub_services(&self, principal: &Principal) -> Result<Vec<SubService>, AppError>;
    async fn get_sub_service(&self, principal: &Principal, id: i64) -> Result<SubService, AppError>;
    async fn create_sub_service(
        &self,
        principal: &Principal,
        body: CreateSubServiceRequest,
    ) -> Result<SubService, AppError>;
    async fn update_sub_service(
        &self,
        principal: &Principal,
        id: i64,
        body: UpdateSubServiceRequest,
    ) -> Result<SubService, AppError>;
    async fn delete_sub_service(&self, principal: &Principal, id: i64) -> Result<(), AppError>;
}

pub struct CatalogServiceImpl {
    service_type_repo: Arc<dyn ServiceTypeRepository>,
    sub_service_repo: Arc<dyn SubServiceRepository>,
}

impl CatalogServiceImpl {
    pub fn new(
        service_type_repo: Arc<dyn ServiceTypeRepository>,
        sub_service_repo: Arc<dyn SubServiceRepository>,
    ) -> Self {
        Self {
            service_type_repo,
            sub_service_repo,
        }
    }

    async fn require_service_type(&self, id: i64) -> Result<(), AppError> {
        match self.service_type_repo.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::dangling_reference("service_type", id)),
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn list_service_types(&self, principal: &Principal) -> Result<Vec<ServiceType>, AppError> {
        self.service_type_repo
            .list(scope_for(Resource::ServiceType, principal))
            .await
    }

    async fn get_service_type(&self, principal: &Principal, id: i64) -> Result<ServiceType, AppError> {
        let row = self.service_type_repo.find_by_id(id).await?;
        visible(row, scope_for(Resource::ServiceType, principal))
    }

    async fn create_service_type(
        &self,
        _principal: &Principal,
        body: CreateServiceTypeRequest,
    ) -> Result<ServiceType, AppError> {
        let new_service_type = NewServiceType {
            name: required("name", body.name)?,
            description: body.description,
        };
        self.service_type_repo.create(&new_service_type).await
    }

    async fn update_service_type(
        &self,
        principal: &Principal,
        id: i64,
        body: UpdateServiceTypeRequest,
    ) -> Result<ServiceType, AppError> {
        let mut service_type = self.get_service_type(principal, id).await?;
        service_type.apply(ServiceTypeChanges {
            name: body.name,
            description: body.description,
        });
        self.service_type_repo.update(&service_type).await
    }

    async fn delete_service_type(&self, principal: &Principal, id: i64) -> Result<(), AppError> {
        let service_type = self.get_service_type(principal, id).await?;
        self.service_type_repo.delete(service_type.id).await
    }

    async fn list_sub_services(&self, principal: &Principal) -> Result<Vec<SubService>, AppError> {
        self.sub_service_repo
            .list(scope_for(Resource::SubService, principal))
            .await
    }

    async fn get_sub_service(&self, principal: &Principal, id: i64) -> Result<SubService, AppError> {
        let row = self.sub_service_repo.find_by_id(id).await?;
        visible(row, scope_for(Resource::SubService, principal))
    }

    async fn create_sub_service(
        &self,
        _principal: &Principal,
        body: CreateSubServiceRequest,
    ) -> Result<SubService, AppError> {
        let service_type_id = required("service_type", body.service_type)?;
        self.require_service_type(service_type_id).await?;

        let new_sub_service = NewSubService {
            service_type_id,
            name: required("name", body.name)?,
            description: body.description,
        };
        self.sub_service_repo.create(&new_sub_service).await
    }

    async fn update_sub_service(
        &self,
        principal: &Principal,
        id: i64,
        body: UpdateSubServiceRequest,
    ) -> Result<SubService, AppError> {
        let mut sub_service = self.get_sub_service(principal, id).await?;
        if let Some(service_type_id) = body.service_type {
            self.require_service_type(service_type_id).await?;
        }

        sub_service.apply(SubServiceChanges {
            service_type_id: body.service_type,
            name: body.name,
            description: body.description,
        });
        self.sub_service_repo.update(&sub_service).await
    }

    async fn delete_sub_service(&self, principal: &Principal, id: i64) -> Result<(), AppError> {
        let sub_service = self.get_sub_service(principal, id).await?;
        self.sub_service_repo.delete(sub_service.id).await
    }
}
