//! Vehicles - Fleet Metrics and Vehicle Detail

use serde::{Deserialize, Serialize};

/// Per-vehicle totals for the selected range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleMetric {
    pub vehicle_id: String,
    pub name: String,
    pub total_trips: f64,
    pub total_mileage: f64,
    pub total_fuel: f64,
    pub fuel_efficiency: f64,
    pub shipments_delivered: f64,
    pub avg_delivery_time: f64,
    pub total_revenue: f64,
    pub revenue_per_trip: f64,
    pub fuel_per_trip: f64,
}

crate::table_record! {
    VehicleMetric => VehicleMetricField {
        VehicleId = "vehicle_id" => vehicle_id,
        Name = "name" => name,
        TotalTrips = "total_trips" => total_trips,
        TotalMileage = "total_mileage" => total_mileage,
        TotalFuel = "total_fuel" => total_fuel,
        FuelEfficiency = "fuel_efficiency" => fuel_efficiency,
        ShipmentsDelivered = "shipments_delivered" => shipments_delivered,
        AvgDeliveryTime = "avg_delivery_time" => avg_delivery_time,
        TotalRevenue = "total_revenue" => total_revenue,
        RevenuePerTrip = "revenue_per_trip" => revenue_per_trip,
        FuelPerTrip = "fuel_per_trip" => fuel_per_trip,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleDetailSummary {
    pub vehicle_id: String,
    pub name: String,
    pub lifetime_mileage: f64,
    pub total_trips: f64,
    pub period_mileage: f64,
    pub total_fuel: f64,
    pub fuel_efficiency: f64,
    pub deliveries_completed: f64,
    pub avg_delivery_time: f64,
    pub total_revenue: f64,
    pub revenue_per_trip: f64,
    pub fuel_per_trip: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPerformance {
    pub date: String,
    pub trips: f64,
    /// Null for a day whose trips recorded no distance, fuel or revenue
    pub daily_mileage: Option<f64>,
    pub daily_fuel: Option<f64>,
    pub daily_revenue: Option<f64>,
    pub daily_deliveries: f64,
}

crate::table_record! {
    DailyPerformance => DailyPerformanceField {
        Date = "date" => date,
        Trips = "trips" => trips,
        DailyMileage = "daily_mileage" => daily_mileage,
        DailyFuel = "daily_fuel" => daily_fuel,
        DailyRevenue = "daily_revenue" => daily_revenue,
        DailyDeliveries = "daily_deliveries" => daily_deliveries,
    }
}

/// A route driven by one vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRoute {
    pub origin: String,
    pub destination: String,
    pub route_trips: f64,
    pub avg_route_time: f64,
    pub avg_route_revenue: f64,
}

crate::table_record! {
    VehicleRoute => VehicleRouteField {
        Origin = "origin" => origin,
        Destination = "destination" => destination,
        RouteTrips = "route_trips" => route_trips,
        AvgRouteTime = "avg_route_time" => avg_route_time,
        AvgRouteRevenue = "avg_route_revenue" => avg_route_revenue,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleDetail {
    pub summary: VehicleDetailSummary,
    pub daily_performance: Vec<DailyPerformance>,
    pub top_routes: Vec<VehicleRoute>,
}
