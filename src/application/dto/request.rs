//! Request DTOs
//!
//! Data structures for API request bodies.
//!
//! Each resource has a `Create*` body, used for POST and PUT, where required
//! fields must be present, and an `Update*` body, used for PATCH, where every
//! field is optional. Foreign keys use the relation name (`mechanic`, not
//! `mechanic_id`).

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::domain::{ServiceStatus, UserType};

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(required(message = "This field is required."))]
    pub username: Option<String>,

    #[validate(required(message = "This field is required."))]
    pub password: Option<String>,
}

/// Refresh token request
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(required(message = "This field is required."))]
    pub refresh: Option<String>,
}

// ---- users ----

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 150, message = "Username must be 1-150 characters")
    )]
    pub username: Option<String>,

    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Ensure this field has no more than 254 characters.")
    )]
    pub email: Option<String>,

    #[validate(length(max = 150, message = "First name must be at most 150 characters"))]
    pub first_name: Option<String>,

    #[validate(length(max = 150, message = "Last name must be at most 150 characters"))]
    pub last_name: Option<String>,

    #[validate(
        required(message = "This field is required."),
        length(min = 1, message = "This field may not be blank.")
    )]
    pub password: Option<String>,

    pub user_type: Option<UserType>,
    pub is_superuser: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: Option<String>,

    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Ensure this field has no more than 254 characters.")
    )]
    pub email: Option<String>,

    #[validate(length(max = 150, message = "First name must be at most 150 characters"))]
    pub first_name: Option<String>,

    #[validate(length(max = 150, message = "Last name must be at most 150 characters"))]
    pub last_name: Option<String>,

    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: Option<String>,

    pub user_type: Option<UserType>,
    pub is_superuser: Option<bool>,
    pub is_active: Option<bool>,
}

impl From<CreateUserRequest> for UpdateUserRequest {
    fn from(body: CreateUserRequest) -> Self {
        Self {
            username: body.username,
            email: body.email,
            first_name: body.first_name,
            last_name: body.last_name,
            password: body.password,
            user_type: body.user_type,
            is_superuser: body.is_superuser,
            is_active: body.is_active,
        }
    }
}

// ---- service catalogue ----

#[derive(Debug, Deserialize, Validate)]
pub struct CreateServiceTypeRequest {
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 100, message = "Name must be 1-100 characters")
    )]
    pub name: Option<String>,

    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateServiceTypeRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
}

impl From<CreateServiceTypeRequest> for UpdateServiceTypeRequest {
    fn from(body: CreateServiceTypeRequest) -> Self {
        Self {
            name: body.name,
            description: Some(body.description),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubServiceRequest {
    #[validate(required(message = "This field is required."))]
    pub service_type: Option<i64>,

    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 100, message = "Name must be 1-100 characters")
    )]
    pub name: Option<String>,

    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateSubServiceRequest {
    pub service_type: Option<i64>,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
}

impl From<CreateSubServiceRequest> for UpdateSubServiceRequest {
    fn from(body: CreateSubServiceRequest) -> Self {
        Self {
            service_type: body.service_type,
            name: body.name,
            description: Some(body.description),
        }
    }
}

// ---- vehicles ----

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 20, message = "Plate number must be 1-20 characters")
    )]
    pub vehicle_plate_number: Option<String>,

    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 50, message = "Type must be 1-50 characters")
    )]
    pub vehicle_type: Option<String>,

    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 100, message = "Model must be 1-100 characters")
    )]
    pub vehicle_model: Option<String>,

    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 100, message = "Engine number must be 1-100 characters")
    )]
    pub vehicle_engine_number: Option<String>,

    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 50, message = "Color must be 1-50 characters")
    )]
    pub vehicle_color: Option<String>,

    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 100, message = "Condition must be 1-100 characters")
    )]
    pub vehicle_general_condition: Option<String>,

    #[validate(required(message = "This field is required."))]
    pub vehicle_owner: Option<i64>,

    #[validate(required(message = "This field is required."))]
    pub mechanic: Option<i64>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 20, message = "Plate number must be 1-20 characters"))]
    pub vehicle_plate_number: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Type must be 1-50 characters"))]
    pub vehicle_type: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Model must be 1-100 characters"))]
    pub vehicle_model: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Engine number must be 1-100 characters"))]
    pub vehicle_engine_number: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Color must be 1-50 characters"))]
    pub vehicle_color: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Condition must be 1-100 characters"))]
    pub vehicle_general_condition: Option<String>,

    pub vehicle_owner: Option<i64>,
    pub mechanic: Option<i64>,
}

impl From<CreateVehicleRequest> for UpdateVehicleRequest {
    fn from(body: CreateVehicleRequest) -> Self {
        Self {
            vehicle_plate_number: body.vehicle_plate_number,
            vehicle_type: body.vehicle_type,
            vehicle_model: body.vehicle_model,
            vehicle_engine_number: body.vehicle_engine_number,
            vehicle_color: body.vehicle_color,
            vehicle_general_condition: body.vehicle_general_condition,
            vehicle_owner: body.vehicle_owner,
            mechanic: body.mechanic,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehiclePartRequest {
    #[validate(required(message = "This field is required."))]
    pub vehicle: Option<i64>,

    #[validate(required(message = "This field is required."))]
    pub mechanic: Option<i64>,

    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 100, message = "Part name must be 1-100 characters")
    )]
    pub part_name: Option<String>,

    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 100, message = "Part condition must be 1-100 characters")
    )]
    pub part_condition: Option<String>,

    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 100, message = "Part status must be 1-100 characters")
    )]
    pub part_status: Option<String>,

    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateVehiclePartRequest {
    pub vehicle: Option<i64>,
    pub mechanic: Option<i64>,

    #[validate(length(min = 1, max = 100, message = "Part name must be 1-100 characters"))]
    pub part_name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Part condition must be 1-100 characters"))]
    pub part_condition: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Part status must be 1-100 characters"))]
    pub part_status: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
}

impl From<CreateVehiclePartRequest> for UpdateVehiclePartRequest {
    fn from(body: CreateVehiclePartRequest) -> Self {
        Self {
            vehicle: body.vehicle,
            mechanic: body.mechanic,
            part_name: body.part_name,
            part_condition: body.part_condition,
            part_status: body.part_status,
            notes: Some(body.notes),
        }
    }
}

// ---- service records ----

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleServiceRequest {
    #[validate(required(message = "This field is required."))]
    pub vehicle: Option<i64>,

    #[validate(required(message = "This field is required."))]
    pub service_type: Option<i64>,

    pub sub_service: Option<i64>,

    #[validate(required(message = "This field is required."))]
    pub service_date: Option<NaiveDate>,

    pub status: Option<ServiceStatus>,

    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateVehicleServiceRequest {
    pub vehicle: Option<i64>,
    pub service_type: Option<i64>,

    #[serde(default, deserialize_with = "nullable")]
    pub sub_service: Option<Option<i64>>,

    pub service_date: Option<NaiveDate>,
    pub status: Option<ServiceStatus>,

    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
}

impl From<CreateVehicleServiceRequest> for UpdateVehicleServiceRequest {
    fn from(body: CreateVehicleServiceRequest) -> Self {
        Self {
            vehicle: body.vehicle,
            service_type: body.service_type,
            sub_service: Some(body.sub_service),
            service_date: body.service_date,
            // A full replacement resets an omitted status to the default.
            status: Some(body.status.unwrap_or_default()),
            notes: Some(body.notes),
        }
    }
}
