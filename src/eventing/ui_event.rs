//! UI Events
//!
//! Events emitted from the service layer to whatever presents them to the user.

use std::sync::Arc;

/// UI events for user feedback
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    /// Display a toast notification
    Toast {
        /// Message to display
        message: Arc<str>,
        /// Affects styling and auto-dismiss
        severity: NotificationSeverity,
    },
}

impl UiEvent {
    pub fn error(message: impl Into<Arc<str>>) -> Self {
        UiEvent::Toast {
            message: message.into(),
            severity: NotificationSeverity::Error,
        }
    }

    pub fn info(message: impl Into<Arc<str>>) -> Self {
        UiEvent::Toast {
            message: message.into(),
            severity: NotificationSeverity::Info,
        }
    }
}

/// Severity level for UI notifications
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationSeverity {
    /// Informational message (auto-dismiss)
    Info,
    /// Success message (auto-dismiss)
    Success,
    /// Warning message (persist until dismissed)
    Warning,
    /// Error message (persist until dismissed)
    Error,
}

impl NotificationSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationSeverity::Info => "info",
            NotificationSeverity::Success => "success",
            NotificationSeverity::Warning => "warning",
            NotificationSeverity::Error => "error",
        }
    }
}
