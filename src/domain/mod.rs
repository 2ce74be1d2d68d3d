//! Domain - Pure Data Structures and Wire Types
//!
//! Records returned by the analytics API plus the date and interval types used to
//! scope requests. Nothing here does I/O except loading the config file.

pub mod config;
pub mod costs;
pub mod dashboard;
pub mod date_range;
pub mod routes;
pub mod shipments;
pub mod system;
pub mod vehicles;

pub use config::AppConfig;
pub use dashboard::{DashboardQuery, TrendInterval};
pub use date_range::{DatePreset, DateRange};
