//! PDF Reports
//!
//! One report builder with two layouts over the same vehicle data:
//! a boxed table and a free-text narrative.

mod canvas;
mod layout;

pub use layout::{render, RenderedReport, ReportData, ReportLayout, VehicleEntry};

use crate::shared::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("PDF rendering failed: {0}")]
    Render(String),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        AppError::Internal(err.to_string())
    }
}
