//! Costs Feature

pub mod controller;
pub mod page;

pub use controller::CostsController;
pub use page::CostsPage;
