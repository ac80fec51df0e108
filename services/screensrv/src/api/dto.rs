//! Response bodies

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::service::LinkSnapshot;

/// Display name reported by the position route
pub const POSITION_NAME: &str = "Display position";

/// `GET /screen` body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenPosition {
    pub name: String,
    pub position: f64,
}

impl ScreenPosition {
    pub fn new(position: f64) -> Self {
        Self {
            name: POSITION_NAME.to_string(),
            position,
        }
    }
}

/// Overall health: `degraded` while the sensor link is down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Degraded,
}

/// `GET /health` body
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: HealthState,
    pub service: String,
    pub version: String,
    pub connection: LinkSnapshot,
    pub position: f64,
    /// Time of the last valid reading
    pub updated_at: Option<DateTime<Utc>>,
    pub timestamp: DateTime<Utc>,
}
