//! SystemState - Backend Recalculation Status

use crate::domain::system::SystemStatus;

/// Blocking overlay shown over every page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// "System Update in Progress"
    Calculating,
    /// "Update Failed" with the backend's error message
    Failed(String),
}

impl Overlay {
    pub fn title(&self) -> &'static str {
        match self {
            Overlay::Calculating => "System Update in Progress",
            Overlay::Failed(_) => "Update Failed",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Overlay::Calculating => {
                "Please wait while we update the analytics data. This may take a few minutes."
            }
            Overlay::Failed(message) => message,
        }
    }
}

/// Latest known recalculation status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemState {
    pub is_calculating: bool,
    pub last_calculated_at: Option<String>,
    pub error_message: Option<String>,
}

impl SystemState {
    /// Replace the state with a fresh status report
    pub fn update(&mut self, status: SystemStatus) {
        self.is_calculating = status.is_calculating;
        self.last_calculated_at = status.last_calculated_at;
        self.error_message = status.error_message;
    }

    /// Overlay to show, if any
    pub fn overlay(&self) -> Option<Overlay> {
        if self.is_calculating {
            return Some(Overlay::Calculating);
        }
        self.error_message
            .as_ref()
            .filter(|m| !m.is_empty())
            .map(|m| Overlay::Failed(m.clone()))
    }
}
