//! Shipments Controller
//!
//! Shipment analytics for the selected date range plus the server-paginated route
//! performance table, which is not scoped by date.

use std::sync::Arc;

use crate::components::data_table::{
    DateScope, RemoteTable, RemoteTableView, SortDirection, SortPagePolicy,
};
use crate::domain::DateRange;
use crate::domain::config::TableConfig;
use crate::domain::shipments::{RoutePerformance, RoutePerformanceField, ShipmentAnalytics};
use crate::error::Result;
use crate::services::ApiClient;
use crate::state::{ResourceState, ResourceStore};

/// Shipments page controller
pub struct ShipmentsController {
    api: ApiClient,
    analytics: ResourceStore<ShipmentAnalytics>,
    routes: RemoteTableView<RoutePerformance>,
}

impl ShipmentsController {
    /// Must be called from within a tokio runtime
    pub fn new(api: ApiClient, table: &TableConfig) -> Self {
        let engine = RemoteTable::new(table.page_size, SortPagePolicy::KeepCurrent, DateScope::NotUsed)
            .with_default_sort(RoutePerformanceField::TotalTrips, SortDirection::Desc);
        let routes = RemoteTableView::spawn(
            "shipment-routes",
            engine,
            Arc::new(api.clone()),
            table.search_debounce(),
        );
        Self {
            api,
            analytics: ResourceStore::new("shipment-analytics"),
            routes,
        }
    }

    /// Fetch analytics for `range`
    pub async fn load(&self, range: &DateRange) -> bool {
        tracing::info!(%range, "Loading shipment analytics");
        self.analytics.load(self.api.shipment_analytics(range)).await
    }

    /// Fetch the first page of route performance
    pub fn load_routes(&self) -> Result<()> {
        self.routes.refresh()
    }

    pub fn analytics(&self) -> ResourceState<ShipmentAnalytics> {
        self.analytics.snapshot()
    }

    pub fn routes(&self) -> &RemoteTableView<RoutePerformance> {
        &self.routes
    }
}
