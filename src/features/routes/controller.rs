//! Routes Controller
//!
//! Three date-scoped paginated tables and the top-performing ranking. Each table keeps
//! its own page, sort and search; a date range change fans out to all of them.

use std::sync::Arc;

use crate::components::data_table::{
    DataSource, DateScope, FieldKey, RemoteTable, RemoteTableView, SortDirection,
    SortPagePolicy, TableRecord,
};
use crate::constants::TOP_ROUTES_LIMIT;
use crate::domain::DateRange;
use crate::domain::config::TableConfig;
use crate::domain::routes::{
    RouteCostValue, RouteCostValueField, RouteOptimization, RouteOptimizationField,
    RouteReliability, RouteReliabilityField, TopRoutePerformance,
};
use crate::error::Result;
use crate::services::ApiClient;
use crate::state::{ResourceState, ResourceStore};

fn date_scoped<R>(
    name: &'static str,
    api: &ApiClient,
    table: &TableConfig,
    policy: SortPagePolicy,
    default_sort: R::Field,
) -> RemoteTableView<R>
where
    R: TableRecord + Send + Sync + 'static,
    ApiClient: DataSource<R>,
{
    tracing::debug!(table = name, sort_by = default_sort.name(), ?policy, "Binding route table");
    let engine = RemoteTable::new(table.page_size, policy, DateScope::Required)
        .with_default_sort(default_sort, SortDirection::Desc);
    RemoteTableView::spawn(name, engine, Arc::new(api.clone()), table.search_debounce())
}

/// Routes page controller
pub struct RoutesController {
    api: ApiClient,
    reliability: RemoteTableView<RouteReliability>,
    cost_value: RemoteTableView<RouteCostValue>,
    optimization: RemoteTableView<RouteOptimization>,
    top: ResourceStore<Vec<TopRoutePerformance>>,
    top_limit: u32,
}

impl RoutesController {
    /// Must be called from within a tokio runtime
    pub fn new(api: ApiClient, table: &TableConfig) -> Self {
        Self {
            reliability: date_scoped(
                "route-reliability",
                &api,
                table,
                SortPagePolicy::KeepCurrent,
                RouteReliabilityField::ReliabilityScore,
            ),
            cost_value: date_scoped(
                "route-cost-value",
                &api,
                table,
                SortPagePolicy::ResetToFirst,
                RouteCostValueField::ValueScore,
            ),
            optimization: date_scoped(
                "route-optimization",
                &api,
                table,
                SortPagePolicy::ResetToFirst,
                RouteOptimizationField::CostTimeEfficiency,
            ),
            top: ResourceStore::new("top-performing-routes"),
            top_limit: TOP_ROUTES_LIMIT,
            api,
        }
    }

    /// Number of routes in the top-performing ranking, at least 1
    pub fn with_top_limit(mut self, limit: u32) -> Self {
        self.top_limit = limit.max(1);
        self
    }

    /// Point every table at `range` and reload the ranking
    pub async fn set_date_range(&self, range: DateRange) -> Result<bool> {
        tracing::info!(%range, "Loading route analytics");
        self.reliability.set_date_range(range)?;
        self.cost_value.set_date_range(range)?;
        self.optimization.set_date_range(range)?;
        Ok(self
            .top
            .load(self.api.top_performing_routes(&range, self.top_limit))
            .await)
    }

    /// Wait for all three tables to land their current request
    pub async fn settled(&self) -> Result<()> {
        let (a, b, c) = tokio::join!(
            self.reliability.settled(),
            self.cost_value.settled(),
            self.optimization.settled()
        );
        a?;
        b?;
        c?;
        Ok(())
    }

    pub fn reliability(&self) -> &RemoteTableView<RouteReliability> {
        &self.reliability
    }

    pub fn cost_value(&self) -> &RemoteTableView<RouteCostValue> {
        &self.cost_value
    }

    pub fn optimization(&self) -> &RemoteTableView<RouteOptimization> {
        &self.optimization
    }

    pub fn top_performing(&self) -> ResourceState<Vec<TopRoutePerformance>> {
        self.top.snapshot()
    }
}
