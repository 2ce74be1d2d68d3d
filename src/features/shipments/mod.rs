//! Shipments Feature

pub mod controller;
pub mod page;

pub use controller::ShipmentsController;
pub use page::ShipmentsPage;
