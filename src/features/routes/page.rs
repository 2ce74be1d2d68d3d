//! Routes Page
//!
//! Reliability, cost-value and optimization tables plus the top performers.

use super::controller::RoutesController;
use crate::components::data_table::{Column, TableInteractions, render_table, sortable_field_names};
use crate::domain::DateRange;
use crate::domain::config::TableConfig;
use crate::domain::routes::{
    RouteCostValue, RouteCostValueField, RouteOptimization, RouteOptimizationField,
    RouteReliability, RouteReliabilityField, TopRouteField, TopRoutePerformance,
};
use crate::error::Result;
use crate::features::{check_sort_fields, heading, resource_status, subheading};
use crate::services::ApiClient;
use crate::state::ResourceState;
use crate::utils::format::{currency_cell, format_rate, hours_cell, number_cell, percent_cell};

pub fn reliability_columns() -> Vec<Column<RouteReliability>> {
    vec![
        Column::new(RouteReliabilityField::Origin, "Origin").sortable(),
        Column::new(RouteReliabilityField::Destination, "Destination").sortable(),
        Column::new(RouteReliabilityField::TotalDeliveries, "Total Deliveries")
            .sortable()
            .align_right()
            .render(|v, _| number_cell(v)),
        Column::new(RouteReliabilityField::ReliabilityScore, "Reliability Score")
            .sortable()
            .align_right()
            .render(|v, _| percent_cell(v)),
        Column::new(RouteReliabilityField::AvgDeliveryTime, "Avg Delivery Time")
            .sortable()
            .align_right()
            .render(|v, _| hours_cell(v)),
        Column::new(RouteReliabilityField::OnTimeDeliveryRate, "On-Time Rate")
            .sortable()
            .align_right()
            .render(|v, _| percent_cell(v)),
    ]
}

pub fn cost_value_columns() -> Vec<Column<RouteCostValue>> {
    vec![
        Column::new(RouteCostValueField::Origin, "Origin").sortable(),
        Column::new(RouteCostValueField::Destination, "Destination").sortable(),
        Column::new(RouteCostValueField::TotalShipments, "Shipments")
            .sortable()
            .align_right()
            .render(|v, _| number_cell(v)),
        Column::new(RouteCostValueField::AvgCost, "Avg Cost")
            .sortable()
            .align_right()
            .render(|v, _| currency_cell(v)),
        Column::new(RouteCostValueField::CostPerKg, "Cost/kg")
            .sortable()
            .align_right()
            .render(|v, _| v.as_f64().map(format_rate).unwrap_or_default()),
        Column::new(RouteCostValueField::ValueCategory, "Value Category").sortable(),
    ]
}

pub fn optimization_columns() -> Vec<Column<RouteOptimization>> {
    vec![
        Column::new(RouteOptimizationField::Origin, "Origin").sortable(),
        Column::new(RouteOptimizationField::Destination, "Destination").sortable(),
        Column::new(RouteOptimizationField::TotalShipments, "Shipments")
            .sortable()
            .align_right()
            .render(|v, _| number_cell(v)),
        Column::new(RouteOptimizationField::AvgCost, "Avg Cost")
            .sortable()
            .align_right()
            .render(|v, _| currency_cell(v)),
        Column::new(RouteOptimizationField::CostTimeEfficiency, "Efficiency Score")
            .sortable()
            .align_right()
            .render(|v, _| number_cell(v)),
        Column::new(RouteOptimizationField::OptimizationRecommendation, "Recommendation"),
    ]
}

pub fn top_performing_columns() -> Vec<Column<TopRoutePerformance>> {
    vec![
        Column::new(TopRouteField::Origin, "Origin"),
        Column::new(TopRouteField::Destination, "Destination"),
        Column::new(TopRouteField::OverallScore, "Performance Score")
            .align_right()
            .render(|v, _| number_cell(v)),
        Column::new(TopRouteField::ReliabilityScore, "Reliability")
            .align_right()
            .render(|v, _| percent_cell(v)),
        Column::new(TopRouteField::TotalRevenue, "Revenue")
            .align_right()
            .render(|v, _| currency_cell(v)),
        Column::new(TopRouteField::TotalShipments, "Shipments")
            .align_right()
            .render(|v, _| number_cell(v)),
    ]
}

/// Routes page component
pub struct RoutesPage {
    controller: RoutesController,
    range: DateRange,
    reliability: Vec<Column<RouteReliability>>,
    cost_value: Vec<Column<RouteCostValue>>,
    optimization: Vec<Column<RouteOptimization>>,
}

impl RoutesPage {
    pub fn new(api: ApiClient, table: &TableConfig, range: DateRange) -> Self {
        Self {
            controller: RoutesController::new(api, table),
            range,
            reliability: reliability_columns(),
            cost_value: cost_value_columns(),
            optimization: optimization_columns(),
        }
    }

    pub fn with_top_limit(mut self, limit: u32) -> Self {
        self.controller = self.controller.with_top_limit(limit);
        self
    }

    pub fn controller(&self) -> &RoutesController {
        &self.controller
    }

    /// Load every section for the page's range and wait for the tables
    pub async fn load(&self) -> Result<()> {
        self.controller.set_date_range(self.range).await?;
        self.controller.settled().await
    }

    /// Replay search, sort and page changes on every route table.
    ///
    /// A header click applies to each table that has that column.
    pub async fn interact(&self, interactions: &TableInteractions) -> Result<()> {
        let mut sortable = sortable_field_names(&self.reliability);
        sortable.extend(sortable_field_names(&self.cost_value));
        sortable.extend(sortable_field_names(&self.optimization));
        sortable.sort_unstable();
        sortable.dedup();
        check_sort_fields(interactions, &sortable)?;

        tokio::try_join!(
            self.controller.reliability().replay(interactions, &self.reliability),
            self.controller.cost_value().replay(interactions, &self.cost_value),
            self.controller.optimization().replay(interactions, &self.optimization),
        )?;
        Ok(())
    }

    pub fn render(&self) -> String {
        let mut out = heading("Route Analytics");
        out.push_str(&format!("{}\n", self.range));

        out.push_str(&subheading("Top Performing Routes"));
        out.push_str(&render_top_performing(&self.controller.top_performing()));
        out.push_str(&subheading("Route Reliability Analysis"));
        out.push_str(&self.controller.reliability().snapshot().render(&self.reliability));
        out.push_str(&subheading("Route Cost-Value Analysis"));
        out.push_str(&self.controller.cost_value().snapshot().render(&self.cost_value));
        out.push_str(&subheading("Route Optimization Opportunities"));
        out.push_str(&self.controller.optimization().snapshot().render(&self.optimization));
        out
    }
}

pub fn render_top_performing(state: &ResourceState<Vec<TopRoutePerformance>>) -> String {
    if let Some(status) = resource_status(state) {
        return status;
    }
    match &state.data {
        Some(routes) => render_table(&top_performing_columns(), routes.iter()),
        None => String::new(),
    }
}
