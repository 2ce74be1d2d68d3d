//! Dashboard Feature

pub mod controller;
pub mod page;

pub use controller::DashboardController;
pub use page::DashboardPage;
