//! Shipments Page
//!
//! Overview cards, the most expensive routes (searchable by origin) and the
//! paginated route performance table.

use super::controller::ShipmentsController;
use crate::components::data_table::{Column, LocalTable, TableInteractions, sortable_field_names};
use crate::domain::DateRange;
use crate::domain::config::TableConfig;
use crate::domain::shipments::{
    ExpensiveRoute, ExpensiveRouteField, RoutePerformance, RoutePerformanceField, ShipmentAnalytics,
};
use crate::error::Result;
use crate::features::{check_sort_fields, heading, metric_block, resource_status, subheading};
use crate::services::ApiClient;
use crate::state::ResourceState;
use crate::utils::format::{currency_cell, format_currency, format_hours, format_number, hours_cell, number_cell};

pub fn expensive_route_columns() -> Vec<Column<ExpensiveRoute>> {
    vec![
        Column::new(ExpensiveRouteField::Origin, "Origin").sortable(),
        Column::new(ExpensiveRouteField::Destination, "Destination").sortable(),
        Column::new(ExpensiveRouteField::TotalCost, "Total Cost")
            .sortable()
            .align_right()
            .render(|v, _| currency_cell(v)),
        Column::new(ExpensiveRouteField::AvgCostPerShipment, "Avg Cost")
            .sortable()
            .align_right()
            .render(|v, _| currency_cell(v)),
        Column::new(ExpensiveRouteField::AvgDeliveryTime, "Avg Time")
            .sortable()
            .align_right()
            .render(|v, _| hours_cell(v)),
    ]
}

pub fn route_performance_columns() -> Vec<Column<RoutePerformance>> {
    vec![
        Column::new(RoutePerformanceField::Origin, "Origin").sortable(),
        Column::new(RoutePerformanceField::Destination, "Destination").sortable(),
        Column::new(RoutePerformanceField::TotalTrips, "Trips")
            .sortable()
            .align_right()
            .render(|v, _| number_cell(v)),
        Column::new(RoutePerformanceField::AvgDeliveryTime, "Avg Time")
            .sortable()
            .align_right()
            .render(|v, _| hours_cell(v)),
        Column::new(RoutePerformanceField::TotalCost, "Total Cost")
            .sortable()
            .align_right()
            .render(|v, _| currency_cell(v)),
        Column::new(RoutePerformanceField::CostPerTrip, "Cost/Trip")
            .sortable()
            .align_right()
            .render(|v, _| currency_cell(v)),
    ]
}

/// Shipments page component
pub struct ShipmentsPage {
    controller: ShipmentsController,
    range: DateRange,
    expensive: LocalTable<ExpensiveRoute>,
    route_columns: Vec<Column<RoutePerformance>>,
}

impl ShipmentsPage {
    pub fn new(api: ApiClient, table: &TableConfig, range: DateRange) -> Self {
        Self {
            controller: ShipmentsController::new(api, table),
            range,
            expensive: LocalTable::new(expensive_route_columns())
                .with_search_key(ExpensiveRouteField::Origin),
            route_columns: route_performance_columns(),
        }
    }

    pub fn controller(&self) -> &ShipmentsController {
        &self.controller
    }

    /// Search and sort of the expensive routes table
    pub fn expensive_routes_mut(&mut self) -> &mut LocalTable<ExpensiveRoute> {
        &mut self.expensive
    }

    /// Load analytics and the first route page, waiting for both
    pub async fn load(&self) -> Result<()> {
        self.controller.load_routes()?;
        self.controller.load(&self.range).await;
        self.controller.routes().settled().await?;
        Ok(())
    }

    /// Replay search, sort and page changes on the route performance table
    pub async fn interact(&self, interactions: &TableInteractions) -> Result<()> {
        check_sort_fields(interactions, &sortable_field_names(&self.route_columns))?;
        self.controller.routes().replay(interactions, &self.route_columns).await?;
        Ok(())
    }

    pub fn render(&self) -> String {
        let mut out = render_analytics(&self.range, &self.controller.analytics(), &self.expensive);
        out.push_str(&subheading("Route Performance"));
        out.push_str(&self.controller.routes().snapshot().render(&self.route_columns));
        out
    }
}

pub fn render_analytics(
    range: &DateRange,
    state: &ResourceState<ShipmentAnalytics>,
    expensive: &LocalTable<ExpensiveRoute>,
) -> String {
    let mut out = heading("Shipment Analytics");
    out.push_str(&format!("{range}\n\n"));

    if let Some(status) = resource_status(state) {
        out.push_str(&status);
        return out;
    }
    let Some(data) = &state.data else {
        return out;
    };

    let overview = &data.overview;
    out.push_str(&metric_block(&[
        ("Total Shipments", format_number(overview.total_shipments)),
        ("Avg Delivery Time", format_hours(overview.avg_delivery_time)),
        ("Total Cost", format_currency(overview.total_cost)),
        ("Avg Cost/Shipment", format_currency(overview.avg_cost_per_shipment)),
        ("Total Weight", format!("{} kg", format_number(overview.total_weight))),
    ]));

    out.push_str(&subheading("Most Expensive Routes"));
    out.push_str(&expensive.render(&data.expensive_routes));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shipments::ShipmentOverview;
    use crate::services::test_support::serve;
    use crate::state::{RequestTracker, ResourceAction};

    const ROUTES: &str = r#"{"data":[{"origin":"Austin","destination":"Dallas","total_trips":12,
        "avg_delivery_time":3.5,"min_delivery_time":2.0,"max_delivery_time":5.0,"total_cost":2400.0,
        "avg_cost":200.0,"total_weight":8000.0,"unique_vehicles":3,"cost_per_trip":200.0}],
        "page":1,"page_size":10,"total":45}"#;

    fn route(origin: &str, cost: f64) -> ExpensiveRoute {
        ExpensiveRoute {
            origin: origin.to_string(),
            destination: "Dallas".to_string(),
            total_shipments: 4.0,
            total_cost: cost,
            avg_cost_per_shipment: cost / 4.0,
            avg_delivery_time: 2.0,
            vehicles_used: 1.0,
        }
    }

    fn loaded() -> ResourceState<ShipmentAnalytics> {
        let tracker = RequestTracker::new();
        let token = tracker.issue();
        let mut state = ResourceState::default();
        state.reduce(ResourceAction::Pending { token });
        state.reduce(ResourceAction::Fulfilled {
            token,
            data: ShipmentAnalytics {
                overview: ShipmentOverview {
                    total_shipments: 1500.0,
                    avg_delivery_time: 2.44,
                    total_cost: 120000.0,
                    avg_cost_per_shipment: 80.0,
                    total_weight: 35000.0,
                    unique_origins: 10.0,
                    unique_destinations: 12.0,
                },
                expensive_routes: vec![route("Austin", 400.0), route("El Paso", 1200.0), route("Houston", 800.0)],
            },
        });
        state
    }

    fn range() -> DateRange {
        DateRange::parse("2025-01-01", "2025-12-31").expect("range")
    }

    #[test]
    fn test_render_overview_and_expensive_routes() {
        let mut table = LocalTable::new(expensive_route_columns()).with_search_key(ExpensiveRouteField::Origin);
        table.set_sort(ExpensiveRouteField::TotalCost);
        table.set_sort(ExpensiveRouteField::TotalCost);

        let text = render_analytics(&range(), &loaded(), &table);
        assert!(text.contains("Total Shipments    1,500\n"));
        assert!(text.contains("Avg Delivery Time  2.4h\n"));
        assert!(text.contains("Total Weight       35,000 kg\n"));
        assert!(text.contains("Total Cost ↓"));

        let el_paso = text.find("El Paso").expect("el paso");
        let houston = text.find("Houston").expect("houston");
        let austin = text.find("Austin").expect("austin");
        assert!(el_paso < houston && houston < austin);
    }

    #[tokio::test]
    async fn test_route_table_interactions() {
        let server = serve(|url: &str| {
            if url.starts_with("/api/shipments/routes") {
                (200, ROUTES.to_string())
            } else {
                (404, String::new())
            }
        });
        let (api, _events) = server.client();
        let table = TableConfig {
            search_debounce_ms: 20,
            ..TableConfig::default()
        };
        let page = ShipmentsPage::new(api, &table, range());
        page.load().await.expect("load");

        let interactions = TableInteractions {
            search: Some("aus".to_string()),
            sort: vec!["total_cost".to_string()],
            page: Some(3),
        };
        page.interact(&interactions).await.expect("interact");

        let urls = server.received();
        let last = urls
            .iter()
            .rev()
            .find(|u| u.starts_with("/api/shipments/routes"))
            .expect("routes request");
        assert!(last.contains("page=3&page_size=10"), "{last}");
        assert!(last.contains("sort_by=total_cost&sort_order=asc"), "{last}");
        assert!(last.contains("search=aus"), "{last}");

        let text = page.render();
        assert!(text.contains("Total Cost ↑"));
        assert!(text.contains("Page 3 of 5  < Prev  Next >"));

        let unknown = TableInteractions {
            sort: vec!["unique_vehicles".to_string()],
            ..TableInteractions::default()
        };
        let err = page.interact(&unknown).await.expect_err("not sortable");
        assert!(err.to_string().contains("cannot sort by \"unique_vehicles\""));
    }

    #[test]
    fn test_search_by_origin() {
        let mut table = LocalTable::new(expensive_route_columns()).with_search_key(ExpensiveRouteField::Origin);
        table.set_search_term("hou");
        let text = render_analytics(&range(), &loaded(), &table);
        assert!(text.contains("Houston"));
        assert!(!text.contains("Austin"));
        // Destination is not a search key
        table.set_search_term("dallas");
        let text = render_analytics(&range(), &loaded(), &table);
        assert!(text.contains("No results."));
    }
}
