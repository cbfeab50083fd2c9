//! REST API Tests

mod auth_tests;
mod catalog_tests;
mod health_tests;
mod report_tests;
mod user_tests;
mod vehicle_tests;
