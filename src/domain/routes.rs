//! Routes - Route Reliability, Value and Optimization

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteReliability {
    pub origin: String,
    pub destination: String,
    pub total_deliveries: f64,
    pub avg_delivery_time: f64,
    pub delivery_time_variation: f64,
    pub reliability_score: f64,
    pub on_time_delivery_rate: f64,
}

crate::table_record! {
    RouteReliability => RouteReliabilityField {
        Origin = "origin" => origin,
        Destination = "destination" => destination,
        TotalDeliveries = "total_deliveries" => total_deliveries,
        AvgDeliveryTime = "avg_delivery_time" => avg_delivery_time,
        DeliveryTimeVariation = "delivery_time_variation" => delivery_time_variation,
        ReliabilityScore = "reliability_score" => reliability_score,
        OnTimeDeliveryRate = "on_time_delivery_rate" => on_time_delivery_rate,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteCostValue {
    pub origin: String,
    pub destination: String,
    pub total_shipments: f64,
    pub avg_shipment_weight: f64,
    pub avg_cost: f64,
    pub cost_per_kg: f64,
    pub value_score: f64,
    pub value_category: String,
}

crate::table_record! {
    RouteCostValue => RouteCostValueField {
        Origin = "origin" => origin,
        Destination = "destination" => destination,
        TotalShipments = "total_shipments" => total_shipments,
        AvgShipmentWeight = "avg_shipment_weight" => avg_shipment_weight,
        AvgCost = "avg_cost" => avg_cost,
        CostPerKg = "cost_per_kg" => cost_per_kg,
        ValueScore = "value_score" => value_score,
        ValueCategory = "value_category" => value_category,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOptimization {
    pub origin: String,
    pub destination: String,
    pub total_shipments: f64,
    pub avg_delivery_time: f64,
    pub avg_cost: f64,
    pub avg_weight: f64,
    pub cost_time_efficiency: f64,
    pub optimization_recommendation: String,
}

crate::table_record! {
    RouteOptimization => RouteOptimizationField {
        Origin = "origin" => origin,
        Destination = "destination" => destination,
        TotalShipments = "total_shipments" => total_shipments,
        AvgDeliveryTime = "avg_delivery_time" => avg_delivery_time,
        AvgCost = "avg_cost" => avg_cost,
        AvgWeight = "avg_weight" => avg_weight,
        CostTimeEfficiency = "cost_time_efficiency" => cost_time_efficiency,
        OptimizationRecommendation = "optimization_recommendation" => optimization_recommendation,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub on_time_delivery_rate: f64,
    pub avg_cost_per_shipment: f64,
    pub total_revenue: f64,
    pub total_weight_shipped: f64,
}

/// Route ranked by overall score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopRoutePerformance {
    pub origin: String,
    pub destination: String,
    pub total_shipments: f64,
    pub reliability_score: f64,
    pub cost_efficiency_score: f64,
    pub delivery_efficiency_score: f64,
    pub overall_score: f64,
    pub performance_metrics: PerformanceMetrics,
}

crate::table_record! {
    TopRoutePerformance => TopRouteField {
        Origin = "origin" => origin,
        Destination = "destination" => destination,
        TotalShipments = "total_shipments" => total_shipments,
        ReliabilityScore = "reliability_score" => reliability_score,
        CostEfficiencyScore = "cost_efficiency_score" => cost_efficiency_score,
        DeliveryEfficiencyScore = "delivery_efficiency_score" => delivery_efficiency_score,
        OverallScore = "overall_score" => overall_score,
        OnTimeDeliveryRate = "on_time_delivery_rate" => performance_metrics.on_time_delivery_rate,
        TotalRevenue = "total_revenue" => performance_metrics.total_revenue,
    }
}
