//! Routes Feature

pub mod controller;
pub mod page;

pub use controller::RoutesController;
pub use page::RoutesPage;
