//! Vehicles Page
//!
//! Fleet table searchable by name or id, and the per-vehicle drill-down.

use super::controller::VehiclesController;
use crate::components::data_table::{Column, LocalTable, render_table};
use crate::domain::DateRange;
use crate::domain::vehicles::{
    DailyPerformance, DailyPerformanceField, VehicleDetail, VehicleMetric, VehicleMetricField,
    VehicleRoute, VehicleRouteField,
};
use crate::features::{heading, metric_block, resource_status, subheading};
use crate::services::ApiClient;
use crate::state::ResourceState;
use crate::utils::format::{
    currency_cell, format_currency, format_hours, format_number, hours_cell, number_cell, or_missing,
};

pub fn vehicle_columns() -> Vec<Column<VehicleMetric>> {
    vec![
        Column::new(VehicleMetricField::Name, "Vehicle").sortable(),
        Column::new(VehicleMetricField::VehicleId, "ID"),
        Column::new(VehicleMetricField::TotalTrips, "Total Trips")
            .sortable()
            .align_right()
            .render(|v, _| number_cell(v)),
        Column::new(VehicleMetricField::TotalMileage, "Mileage")
            .sortable()
            .align_right()
            .render(|v, _| v.as_f64().map(|m| format!("{} km", format_number(m))).unwrap_or_default()),
        Column::new(VehicleMetricField::FuelEfficiency, "Fuel Efficiency")
            .sortable()
            .align_right()
            .render(|v, _| v.as_f64().map(|f| format!("{f:.2} km/l")).unwrap_or_default()),
        Column::new(VehicleMetricField::RevenuePerTrip, "Revenue/Trip")
            .sortable()
            .align_right()
            .render(|v, _| currency_cell(v)),
        Column::new(VehicleMetricField::ShipmentsDelivered, "Deliveries")
            .sortable()
            .align_right()
            .render(|v, _| number_cell(v)),
    ]
}

pub fn daily_performance_columns() -> Vec<Column<DailyPerformance>> {
    vec![
        Column::new(DailyPerformanceField::Date, "Date"),
        Column::new(DailyPerformanceField::Trips, "Trips")
            .align_right()
            .render(|v, _| number_cell(v)),
        Column::new(DailyPerformanceField::DailyMileage, "Mileage")
            .align_right()
            .render(|v, _| or_missing(v, number_cell)),
        Column::new(DailyPerformanceField::DailyFuel, "Fuel")
            .align_right()
            .render(|v, _| or_missing(v, number_cell)),
        Column::new(DailyPerformanceField::DailyRevenue, "Revenue")
            .align_right()
            .render(|v, _| or_missing(v, currency_cell)),
        Column::new(DailyPerformanceField::DailyDeliveries, "Deliveries")
            .align_right()
            .render(|v, _| number_cell(v)),
    ]
}

pub fn top_route_columns() -> Vec<Column<VehicleRoute>> {
    vec![
        Column::new(VehicleRouteField::Origin, "Origin"),
        Column::new(VehicleRouteField::Destination, "Destination"),
        Column::new(VehicleRouteField::RouteTrips, "Trips")
            .align_right()
            .render(|v, _| number_cell(v)),
        Column::new(VehicleRouteField::AvgRouteTime, "Avg Time")
            .align_right()
            .render(|v, _| hours_cell(v)),
        Column::new(VehicleRouteField::AvgRouteRevenue, "Avg Revenue")
            .align_right()
            .render(|v, _| currency_cell(v)),
    ]
}

/// Vehicles page component
pub struct VehiclesPage {
    controller: VehiclesController,
    range: DateRange,
    table: LocalTable<VehicleMetric>,
}

impl VehiclesPage {
    pub fn new(api: ApiClient, range: DateRange) -> Self {
        Self {
            controller: VehiclesController::new(api),
            range,
            table: LocalTable::new(vehicle_columns())
                .with_search_keys([VehicleMetricField::Name, VehicleMetricField::VehicleId]),
        }
    }

    pub fn controller(&self) -> &VehiclesController {
        &self.controller
    }

    pub fn table_mut(&mut self) -> &mut LocalTable<VehicleMetric> {
        &mut self.table
    }

    pub async fn load(&self) -> bool {
        self.controller.load(&self.range).await
    }

    pub async fn load_detail(&self, vehicle_id: &str) -> bool {
        self.controller.load_detail(vehicle_id, &self.range).await
    }

    pub fn render(&self) -> String {
        render_fleet(&self.range, &self.controller.metrics(), &self.table)
    }

    pub fn render_detail(&self) -> String {
        render_detail(&self.controller.detail())
    }
}

pub fn render_fleet(
    range: &DateRange,
    state: &ResourceState<Vec<VehicleMetric>>,
    table: &LocalTable<VehicleMetric>,
) -> String {
    let mut out = heading("Vehicle Analytics");
    out.push_str(&format!("{range}\n\n"));
    if let Some(status) = resource_status(state) {
        out.push_str(&status);
        return out;
    }
    if let Some(metrics) = &state.data {
        if !table.search_term().is_empty() {
            out.push_str(&format!("Search: {}\n", table.search_term()));
        }
        out.push_str(&table.render(metrics));
    }
    out
}

pub fn render_detail(state: &ResourceState<VehicleDetail>) -> String {
    if let Some(status) = resource_status(state) {
        return status;
    }
    let Some(detail) = &state.data else {
        return String::new();
    };

    let summary = &detail.summary;
    let mut out = heading(&format!("{} ({})", summary.name, summary.vehicle_id));
    out.push_str(&metric_block(&[
        ("Total Trips", format_number(summary.total_trips)),
        ("Lifetime Mileage", format!("{} km", format_number(summary.lifetime_mileage))),
        ("Fuel Efficiency", format!("{:.2} km/l", summary.fuel_efficiency)),
        ("Revenue Per Trip", format_currency(summary.revenue_per_trip)),
        ("Deliveries Completed", format_number(summary.deliveries_completed)),
        ("Avg Delivery Time", format_hours(summary.avg_delivery_time)),
    ]));

    out.push_str(&subheading("Daily Performance"));
    out.push_str(&render_table(&daily_performance_columns(), &detail.daily_performance));
    out.push_str(&subheading("Top Routes"));
    out.push_str(&render_table(&top_route_columns(), &detail.top_routes));
    out
}
