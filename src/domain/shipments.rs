//! Shipments - Shipment Analytics and Route Performance

use serde::{Deserialize, Serialize};

/// Shipment totals for the selected range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentOverview {
    pub total_shipments: f64,
    pub avg_delivery_time: f64,
    pub total_cost: f64,
    pub avg_cost_per_shipment: f64,
    pub total_weight: f64,
    pub unique_origins: f64,
    pub unique_destinations: f64,
}

/// Most expensive origin/destination pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpensiveRoute {
    pub origin: String,
    pub destination: String,
    pub total_shipments: f64,
    pub total_cost: f64,
    pub avg_cost_per_shipment: f64,
    pub avg_delivery_time: f64,
    pub vehicles_used: f64,
}

crate::table_record! {
    ExpensiveRoute => ExpensiveRouteField {
        Origin = "origin" => origin,
        Destination = "destination" => destination,
        TotalShipments = "total_shipments" => total_shipments,
        TotalCost = "total_cost" => total_cost,
        AvgCostPerShipment = "avg_cost_per_shipment" => avg_cost_per_shipment,
        AvgDeliveryTime = "avg_delivery_time" => avg_delivery_time,
        VehiclesUsed = "vehicles_used" => vehicles_used,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentAnalytics {
    pub overview: ShipmentOverview,
    pub expensive_routes: Vec<ExpensiveRoute>,
}

/// One row of the paginated route performance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePerformance {
    pub origin: String,
    pub destination: String,
    pub total_trips: f64,
    pub avg_delivery_time: f64,
    pub min_delivery_time: f64,
    pub max_delivery_time: f64,
    pub total_cost: f64,
    pub avg_cost: f64,
    pub total_weight: f64,
    pub unique_vehicles: f64,
    pub cost_per_trip: f64,
}

crate::table_record! {
    RoutePerformance => RoutePerformanceField {
        Origin = "origin" => origin,
        Destination = "destination" => destination,
        TotalTrips = "total_trips" => total_trips,
        AvgDeliveryTime = "avg_delivery_time" => avg_delivery_time,
        MinDeliveryTime = "min_delivery_time" => min_delivery_time,
        MaxDeliveryTime = "max_delivery_time" => max_delivery_time,
        TotalCost = "total_cost" => total_cost,
        AvgCost = "avg_cost" => avg_cost,
        TotalWeight = "total_weight" => total_weight,
        UniqueVehicles = "unique_vehicles" => unique_vehicles,
        CostPerTrip = "cost_per_trip" => cost_per_trip,
    }
}
