//! System - Backend Recalculation Status

use serde::{Deserialize, Serialize};

/// Response of the system status endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStatus {
    #[serde(default)]
    pub is_calculating: bool,
    pub last_calculated_at: Option<String>,
    pub error_message: Option<String>,
}
