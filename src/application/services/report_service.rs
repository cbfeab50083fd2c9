//! Report Service
//!
//! Collects every vehicle, regardless of who asks, and renders the PDF
//! export in the requested layout.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{
    Scope, User, UserRepository, Vehicle, VehiclePartRepository, VehicleRepository,
};
use crate::infrastructure::metrics::record_pdf_report;
use crate::infrastructure::pdf::{render, RenderedReport, ReportData, ReportLayout, VehicleEntry};
use crate::shared::error::AppError;

const UNKNOWN_OWNER: &str = "Unknown";

#[async_trait]
pub trait ReportService: Send + Sync {
    async fn generate(&self, requester: &User, layout: ReportLayout)
        -> Result<RenderedReport, AppError>;
}

pub struct ReportServiceImpl {
    user_repo: Arc<dyn UserRepository>,
    vehicle_repo: Arc<dyn VehicleRepository>,
    part_repo: Arc<dyn VehiclePartRepository>,
}

impl ReportServiceImpl {
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

    /// Load owners and parts for the narrative layout.
    async fn collect_entries(
        &self,
        layout: ReportLayout,
        vehicles: Vec<Vehicle>,
    ) -> Result<Vec<VehicleEntry>, AppError> {
        if layout == ReportLayout::Table {
            return Ok(vehicles
                .into_iter()
                .map(|vehicle| VehicleEntry {
                    vehicle,
                    owner_name: String::new(),
                    parts: Vec::new(),
                })
                .collect());
        }

        let mut owners: HashMap<i64, String> = HashMap::new();
        let mut entries = Vec::with_capacity(vehicles.len());
        for vehicle in vehicles {
            let owner_name = match owners.get(&vehicle.vehicle_owner_id) {
                Some(name) => name.clone(),
                None => {
                    let name = self
                        .user_repo
                        .find_by_id(vehicle.vehicle_owner_id)
                        .await?
                        .map(|owner| owner.full_name())
                        .unwrap_or_else(|| UNKNOWN_OWNER.to_string());
                    owners.insert(vehicle.vehicle_owner_id, name.clone());
                    name
                }
            };
            let parts = self
                .part_repo
                .list_for_vehicle(vehicle.id)
                .await?
                .iter()
                .map(|part| part.summary())
                .collect();

            entries.push(VehicleEntry {
                vehicle,
                owner_name,
                parts,
            });
        }
        Ok(entries)
    }
}

#[async_trait]
impl ReportService for ReportServiceImpl {
    async fn generate(
        &self,
        requester: &User,
        layout: ReportLayout,
    ) -> Result<RenderedReport, AppError> {
        let vehicles = self.vehicle_repo.list(Scope::All).await?;
        let data = ReportData {
            generated_at: Utc::now(),
            requested_by: requester.full_name(),
            vehicles: self.collect_entries(layout, vehicles).await?,
        };

        let report = render(layout, &data)?;
        record_pdf_report(layout.as_str());
        tracing::info!(
            user_id = requester.id,
            layout = layout.as_str(),
            vehicles = data.vehicles.len(),
            pages = report.pages,
            "PDF report generated"
        );
        Ok(report)
    }
}
