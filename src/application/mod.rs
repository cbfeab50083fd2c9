//! Application Layer
//!
//! Services that apply the access policy and reference checks on top of the
//! repositories, plus the request/response DTOs the HTTP layer speaks.

pub mod dto;
pub mod services;
