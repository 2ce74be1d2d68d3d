//! Vehicles Controller
//!
//! Fleet metrics for the selected range, and the drill-down detail of one vehicle.

use crate::domain::DateRange;
use crate::domain::vehicles::{VehicleDetail, VehicleMetric};
use crate::services::ApiClient;
use crate::state::{ResourceState, ResourceStore};

/// Vehicles page controller
pub struct VehiclesController {
    api: ApiClient,
    metrics: ResourceStore<Vec<VehicleMetric>>,
    detail: ResourceStore<VehicleDetail>,
}

impl VehiclesController {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            metrics: ResourceStore::new("vehicle-metrics"),
            // A detail request already in flight wins over a repeated one
            detail: ResourceStore::new("vehicle-detail").skip_while_loading(),
        }
    }

    pub async fn load(&self, range: &DateRange) -> bool {
        tracing::info!(%range, "Loading vehicle metrics");
        self.metrics.load(self.api.vehicle_metrics(range)).await
    }

    /// Fetch the detail of `vehicle_id`; ignored while another detail load is running
    pub async fn load_detail(&self, vehicle_id: &str, range: &DateRange) -> bool {
        tracing::info!(vehicle_id, %range, "Loading vehicle detail");
        self.detail.load(self.api.vehicle_details(vehicle_id, range)).await
    }

    /// Forget the detail when leaving the drill-down
    pub fn clear_detail(&self) {
        self.detail.clear();
    }

    pub fn metrics(&self) -> ResourceState<Vec<VehicleMetric>> {
        self.metrics.snapshot()
    }

    pub fn detail(&self) -> ResourceState<VehicleDetail> {
        self.detail.snapshot()
    }
}
