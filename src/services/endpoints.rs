//! API Endpoint Paths
//!
//! Relative to the configured base URL.

pub const DASHBOARD: &str = "/dashboard";

pub const SHIPMENTS_ANALYTICS: &str = "/shipments/analytics";
pub const SHIPMENTS_ROUTES: &str = "/shipments/routes";

pub const VEHICLES_METRICS: &str = "/vehicles/metrics";
/// Followed by `/{id}/details`
pub const VEHICLES_DETAILS: &str = "/vehicles";

pub const ROUTES_RELIABILITY: &str = "/route/reliability";
pub const ROUTES_COST_VALUE: &str = "/route/cost-value";
pub const ROUTES_OPTIMIZATION: &str = "/route/optimization";
pub const ROUTES_TOP_PERFORMING: &str = "/route/top-performing";

pub const COSTS_OVERVIEW: &str = "/costs/overview";

pub const SYSTEM_STATUS: &str = "/system/status";

pub fn vehicle_details(id: &str) -> String {
    format!("{VEHICLES_DETAILS}/{id}/details")
}
