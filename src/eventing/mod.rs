//! Eventing - Service to UI Events

pub mod ui_event;

pub use ui_event::{NotificationSeverity, UiEvent};
