//! Costs Controller

use crate::domain::DateRange;
use crate::domain::costs::CostOverview;
use crate::services::ApiClient;
use crate::state::{ResourceState, ResourceStore};

/// Costs page controller
pub struct CostsController {
    api: ApiClient,
    overview: ResourceStore<CostOverview>,
}

impl CostsController {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            overview: ResourceStore::new("cost-overview"),
        }
    }

    pub async fn load(&self, range: &DateRange) -> bool {
        tracing::info!(%range, "Loading cost overview");
        self.overview.load(self.api.cost_overview(range)).await
    }

    pub fn overview(&self) -> ResourceState<CostOverview> {
        self.overview.snapshot()
    }
}
