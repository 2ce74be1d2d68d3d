//! Costs - Cost Overview

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCostRoute {
    pub origin: String,
    pub destination: String,
    pub total_cost: f64,
    pub shipment_count: f64,
    pub avg_cost: f64,
}

crate::table_record! {
    TopCostRoute => TopCostRouteField {
        Origin = "origin" => origin,
        Destination = "destination" => destination,
        TotalCost = "total_cost" => total_cost,
        ShipmentCount = "shipment_count" => shipment_count,
        AvgCost = "avg_cost" => avg_cost,
    }
}

/// Cost totals with growth against the previous period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostOverview {
    pub total_cost: f64,
    pub avg_cost_per_shipment: f64,
    pub total_shipments: f64,
    pub cost_per_km: f64,
    pub cost_per_kg: f64,
    pub vehicles_used: f64,
    pub prev_total_cost: f64,
    pub prev_avg_cost: f64,
    pub cost_growth_percentage: f64,
    pub avg_cost_growth_percentage: f64,
    #[serde(default)]
    pub top_cost_routes: Vec<TopCostRoute>,
}
