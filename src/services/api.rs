//! API Client
//!
//! Typed access to the analytics backend. Every failure is classified here, once,
//! into a toast notification; callers only see the [`Error`] and keep their own
//! inline error string.

use std::sync::Arc;

use reqwest::Client;
use serde::de::DeserializeOwned;

use super::endpoints;
use super::notify::Notifier;
use crate::components::data_table::{DataSource, Page, PageRequest};
use crate::domain::config::ApiConfig;
use crate::domain::costs::CostOverview;
use crate::domain::dashboard::{DashboardOverview, DashboardQuery};
use crate::domain::routes::{RouteCostValue, RouteOptimization, RouteReliability, TopRoutePerformance};
use crate::domain::shipments::{RoutePerformance, ShipmentAnalytics};
use crate::domain::system::SystemStatus;
use crate::domain::vehicles::{VehicleDetail, VehicleMetric};
use crate::domain::DateRange;
use crate::error::{Error, Result};

const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Toast text for a failed request
pub fn notification_message(error: &Error) -> String {
    match error.status() {
        Some(401) => "Session expired. Please login again.".to_string(),
        Some(403) => "You do not have permission to perform this action".to_string(),
        Some(404) => "Resource not found".to_string(),
        Some(500) => "Server error. Please try again later".to_string(),
        _ => error
            .server_message()
            .filter(|m| !m.is_empty())
            .unwrap_or(UNEXPECTED_ERROR)
            .to_string(),
    }
}

/// Message carried by an error body: `{"message": ...}` or `{"detail": ...}`.
///
/// A validation `detail` list yields its first `msg`.
fn body_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
        return Some(message.to_string());
    }
    match value.get("detail")? {
        serde_json::Value::String(detail) => Some(detail.clone()),
        serde_json::Value::Array(items) => items
            .iter()
            .find_map(|item| item.get("msg").and_then(|m| m.as_str()))
            .map(String::from),
        _ => None,
    }
}

/// HTTP client for the analytics API.
///
/// Cheap to clone; clones share the connection pool and notifier.
#[derive(Clone, Debug)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

#[derive(Debug)]
struct ApiClientInner {
    base_url: String,
    http: Client,
    notifier: Notifier,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, notifier: Notifier) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            inner: Arc::new(ApiClientInner {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                http,
                notifier,
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// GET `path` and decode the JSON body, notifying on failure
    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&'static str, String)]) -> Result<T> {
        let result = self.send_get(path, query).await;
        if let Err(e) = &result {
            tracing::warn!(path, error = %e, "Request failed");
            self.inner.notifier.error(notification_message(e));
        }
        result
    }

    async fn send_get<T: DeserializeOwned>(&self, path: &str, query: &[(&'static str, String)]) -> Result<T> {
        let url = format!("{}{}", self.inner.base_url, path);
        tracing::debug!(%url, ?query, "GET");

        let response = self.inner.http.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                message: body_message(&body),
            });
        }
        Ok(response.json::<T>().await?)
    }

    fn range_query(range: &DateRange) -> Vec<(&'static str, String)> {
        vec![("start", range.start_param()), ("end", range.end_param())]
    }

    // ==================== Dashboard ====================

    pub async fn dashboard(&self, query: &DashboardQuery) -> Result<DashboardOverview> {
        self.get(endpoints::DASHBOARD, &query.query()).await
    }

    // ==================== Shipments ====================

    pub async fn shipment_analytics(&self, range: &DateRange) -> Result<ShipmentAnalytics> {
        self.get(endpoints::SHIPMENTS_ANALYTICS, &Self::range_query(range)).await
    }

    pub async fn shipment_routes(&self, request: &PageRequest) -> Result<Page<RoutePerformance>> {
        self.get(endpoints::SHIPMENTS_ROUTES, &request.query()).await
    }

    // ==================== Vehicles ====================

    pub async fn vehicle_metrics(&self, range: &DateRange) -> Result<Vec<VehicleMetric>> {
        self.get(endpoints::VEHICLES_METRICS, &Self::range_query(range)).await
    }

    pub async fn vehicle_details(&self, id: &str, range: &DateRange) -> Result<VehicleDetail> {
        if id.trim().is_empty() || id.contains('/') {
            return Err(Error::Invalid {
                message: format!("Invalid vehicle id: {id:?}"),
            });
        }
        self.get(&endpoints::vehicle_details(id), &Self::range_query(range)).await
    }

    // ==================== Routes ====================

    pub async fn route_reliability(&self, request: &PageRequest) -> Result<Page<RouteReliability>> {
        self.get(endpoints::ROUTES_RELIABILITY, &request.query()).await
    }

    pub async fn route_cost_value(&self, request: &PageRequest) -> Result<Page<RouteCostValue>> {
        self.get(endpoints::ROUTES_COST_VALUE, &request.query()).await
    }

    pub async fn route_optimization(&self, request: &PageRequest) -> Result<Page<RouteOptimization>> {
        self.get(endpoints::ROUTES_OPTIMIZATION, &request.query()).await
    }

    pub async fn top_performing_routes(&self, range: &DateRange, limit: u32) -> Result<Vec<TopRoutePerformance>> {
        let mut query = Self::range_query(range);
        query.push(("limit", limit.to_string()));
        self.get(endpoints::ROUTES_TOP_PERFORMING, &query).await
    }

    // ==================== Costs ====================

    pub async fn cost_overview(&self, range: &DateRange) -> Result<CostOverview> {
        self.get(endpoints::COSTS_OVERVIEW, &Self::range_query(range)).await
    }

    // ==================== System ====================

    pub async fn system_status(&self) -> Result<SystemStatus> {
        self.get(endpoints::SYSTEM_STATUS, &[]).await
    }
}

impl DataSource<RoutePerformance> for ApiClient {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page<RoutePerformance>> {
        self.shipment_routes(&request).await
    }
}

impl DataSource<RouteReliability> for ApiClient {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page<RouteReliability>> {
        self.route_reliability(&request).await
    }
}

impl DataSource<RouteCostValue> for ApiClient {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page<RouteCostValue>> {
        self.route_cost_value(&request).await
    }
}

impl DataSource<RouteOptimization> for ApiClient {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page<RouteOptimization>> {
        self.route_optimization(&request).await
    }
}
