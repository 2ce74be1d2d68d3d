//! Dashboard Controller
//!
//! Loads the headline metrics for the selected trend interval.

use tokio::sync::watch;

use crate::domain::dashboard::{DashboardOverview, DashboardQuery};
use crate::services::ApiClient;
use crate::state::{ResourceState, ResourceStore};

/// Dashboard page controller
pub struct DashboardController {
    api: ApiClient,
    overview: ResourceStore<DashboardOverview>,
}

impl DashboardController {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            overview: ResourceStore::new("dashboard"),
        }
    }

    /// Fetch the overview for `query`. Returns whether the outcome was applied.
    pub async fn load(&self, query: &DashboardQuery) -> bool {
        tracing::info!(
            interval = query.interval.as_str(),
            periods_back = query.periods_back,
            range = %query.range,
            "Loading dashboard"
        );
        self.overview.load(self.api.dashboard(query)).await
    }

    pub fn overview(&self) -> ResourceState<DashboardOverview> {
        self.overview.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceState<DashboardOverview>> {
        self.overview.subscribe()
    }
}
