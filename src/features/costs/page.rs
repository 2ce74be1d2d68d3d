//! Costs Page
//!
//! Cost metrics with growth against the previous period, and the top cost routes.

use super::controller::CostsController;
use crate::components::data_table::{Column, LocalTable};
use crate::domain::DateRange;
use crate::domain::costs::{CostOverview, TopCostRoute, TopCostRouteField};
use crate::features::{heading, metric_block, resource_status, subheading, trend_text};
use crate::services::ApiClient;
use crate::state::ResourceState;
use crate::utils::format::{currency_cell, format_currency, format_number, format_rate, number_cell};

pub fn top_cost_route_columns() -> Vec<Column<TopCostRoute>> {
    vec![
        Column::new(TopCostRouteField::Origin, "Origin").sortable(),
        Column::new(TopCostRouteField::Destination, "Destination").sortable(),
        Column::new(TopCostRouteField::TotalCost, "Total Cost")
            .sortable()
            .align_right()
            .render(|v, _| currency_cell(v)),
        Column::new(TopCostRouteField::ShipmentCount, "Shipments")
            .sortable()
            .align_right()
            .render(|v, _| number_cell(v)),
        Column::new(TopCostRouteField::AvgCost, "Avg Cost")
            .sortable()
            .align_right()
            .render(|v, _| currency_cell(v)),
    ]
}

/// Costs page component
pub struct CostsPage {
    controller: CostsController,
    range: DateRange,
    top_routes: LocalTable<TopCostRoute>,
}

impl CostsPage {
    pub fn new(api: ApiClient, range: DateRange) -> Self {
        Self {
            controller: CostsController::new(api),
            range,
            top_routes: LocalTable::new(top_cost_route_columns()),
        }
    }

    pub fn controller(&self) -> &CostsController {
        &self.controller
    }

    pub fn top_routes_mut(&mut self) -> &mut LocalTable<TopCostRoute> {
        &mut self.top_routes
    }

    pub async fn load(&self) -> bool {
        self.controller.load(&self.range).await
    }

    pub fn render(&self) -> String {
        render_costs(&self.range, &self.controller.overview(), &self.top_routes)
    }
}

pub fn render_costs(
    range: &DateRange,
    state: &ResourceState<CostOverview>,
    top_routes: &LocalTable<TopCostRoute>,
) -> String {
    let mut out = heading("Cost Analytics");
    out.push_str(&format!("{range}\n\n"));
    if let Some(status) = resource_status(state) {
        out.push_str(&status);
        return out;
    }
    let Some(data) = &state.data else {
        return out;
    };

    out.push_str(&metric_block(&[
        (
            "Total Cost",
            format!("{}{}", format_currency(data.total_cost), trend_text(data.cost_growth_percentage)),
        ),
        (
            "Average Cost/Shipment",
            format!(
                "{}{}",
                format_currency(data.avg_cost_per_shipment),
                trend_text(data.avg_cost_growth_percentage)
            ),
        ),
        ("Cost per KM", format_rate(data.cost_per_km)),
        ("Cost per KG", format_rate(data.cost_per_kg)),
        ("Total Shipments", format_number(data.total_shipments)),
        ("Vehicles Used", format_number(data.vehicles_used)),
    ]));

    out.push_str(&subheading("Top Cost Routes"));
    out.push_str(&top_routes.render(&data.top_cost_routes));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::scripted;

    const OVERVIEW: &str = r#"{"total_cost":250000.0,"avg_cost_per_shipment":125.5,"total_shipments":2000,
        "cost_per_km":1.234,"cost_per_kg":0.5,"vehicles_used":18,"prev_total_cost":200000.0,
        "prev_avg_cost":120.0,"cost_growth_percentage":25.0,"avg_cost_growth_percentage":-4.6,
        "top_cost_routes":[
            {"origin":"Austin","destination":"Denver","total_cost":9000.0,"shipment_count":30,"avg_cost":300.0},
            {"origin":"Miami","destination":"Atlanta","total_cost":12000.0,"shipment_count":60,"avg_cost":200.0}
        ]}"#;

    #[tokio::test]
    async fn test_load_and_render() {
        let server = scripted(vec![(200, OVERVIEW)]);
        let (api, _events) = server.client();
        let range = DateRange::parse("2025-01-01", "2025-03-31").expect("range");
        let mut page = CostsPage::new(api, range);

        assert!(page.load().await);
        let url = server.urls.recv().expect("url");
        assert_eq!(url, "/api/costs/overview?start=2025-01-01&end=2025-03-31");

        page.top_routes_mut().set_sort(TopCostRouteField::TotalCost);
        let text = page.render();
        assert!(text.contains("Total Cost             $250,000  ▲ 25% from previous\n"));
        assert!(text.contains("Average Cost/Shipment  $125.5  ▼ 4.6% from previous\n"));
        assert!(text.contains("Cost per KM            $1.23\n"));
        assert!(text.contains("Vehicles Used          18\n"));
        assert!(text.find("Austin").expect("austin") < text.find("Miami").expect("miami"));
    }

    #[tokio::test]
    async fn test_failed_load_renders_inline_error() {
        let server = scripted(vec![(403, r#"{"detail":"Forbidden"}"#)]);
        let (api, events) = server.client();
        let range = DateRange::parse("2025-01-01", "2025-03-31").expect("range");
        let page = CostsPage::new(api, range);

        assert!(page.load().await);
        assert!(page.render().ends_with("Error: Request failed with status code 403\n"));
        assert_eq!(
            crate::services::test_support::toasts(&events),
            vec!["You do not have permission to perform this action"]
        );
    }
}
