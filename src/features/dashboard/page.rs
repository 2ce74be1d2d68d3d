//! Dashboard Page
//!
//! Four metric cards, each with its change against the previous period.

use super::controller::DashboardController;
use crate::domain::dashboard::{DashboardOverview, DashboardQuery};
use crate::features::{heading, metric_block, resource_status, trend_text};
use crate::services::ApiClient;
use crate::state::ResourceState;
use crate::utils::format::{format_currency, format_number};

/// Dashboard page component
pub struct DashboardPage {
    controller: DashboardController,
    query: DashboardQuery,
}

impl DashboardPage {
    pub fn new(api: ApiClient, query: DashboardQuery) -> Self {
        Self {
            controller: DashboardController::new(api),
            query,
        }
    }

    pub fn controller(&self) -> &DashboardController {
        &self.controller
    }

    /// Switch interval or period and reload
    pub async fn set_query(&mut self, query: DashboardQuery) -> bool {
        self.query = query;
        self.controller.load(&self.query).await
    }

    pub async fn load(&self) -> bool {
        self.controller.load(&self.query).await
    }

    pub fn render(&self) -> String {
        render_dashboard(&self.query, &self.controller.overview())
    }
}

pub fn render_dashboard(query: &DashboardQuery, state: &ResourceState<DashboardOverview>) -> String {
    let mut out = heading("Dashboard Overview");
    out.push_str(&format!(
        "{} trend, {} period(s) back: {}\n\n",
        query.interval.label(),
        query.periods_back,
        query.range
    ));

    if let Some(status) = resource_status(state) {
        out.push_str(&status);
        return out;
    }
    let Some(data) = &state.data else {
        return out;
    };

    out.push_str(&metric_block(&[
        (
            "Total Shipments",
            format!("{}{}", format_number(data.total_shipments), trend_text(data.shipment_trend)),
        ),
        (
            "Active Vehicles",
            format!("{}{}", format_number(data.active_vehicles), trend_text(data.vehicle_trend)),
        ),
        (
            "Total Revenue",
            format!("{}{}", format_currency(data.total_revenue), trend_text(data.revenue_trend)),
        ),
        (
            "Avg Delivery Time",
            format!("{}h{}", format_number(data.avg_delivery_time), trend_text(data.delivery_time_trend)),
        ),
    ]));
    out
}
