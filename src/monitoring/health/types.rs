//! Health evaluation types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse health classification, ordered from best to worst
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    #[default]
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
            Self::Unhealthy => "unhealthy",
        }
    }

    /// Move to `other` if it is worse than the current state
    pub fn escalate(&mut self, other: HealthState) {
        if other > *self {
            *self = other;
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs the status was derived from; resource fields are `None` before the first snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HealthMetrics {
    pub requests_last_5min: usize,
    pub error_rate: f64,
    pub cpu_percent: Option<f64>,
    pub memory_percent: Option<f64>,
    pub disk_percent: Option<f64>,
    pub avg_response_time: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub status: HealthState,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: f64,
    pub issues: Vec<String>,
    pub metrics: HealthMetrics,
}
