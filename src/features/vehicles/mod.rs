//! Vehicles Feature

pub mod controller;
pub mod page;

pub use controller::VehiclesController;
pub use page::VehiclesPage;
