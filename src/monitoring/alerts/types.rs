//! Alert types and bookkeeping

use crate::config::AlertThresholds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Alert severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Warning,
    Critical,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Warning => write!(f, "WARNING"),
            AlertSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Every condition the manager knows how to check; cooldown is tracked per kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    HighErrorRate,
    SlowResponseTime,
    HighCpuUsage,
    HighMemoryUsage,
    HighDiskUsage,
}

impl AlertKind {
    pub const ALL: [AlertKind; 5] = [
        AlertKind::HighErrorRate,
        AlertKind::SlowResponseTime,
        AlertKind::HighCpuUsage,
        AlertKind::HighMemoryUsage,
        AlertKind::HighDiskUsage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighErrorRate => "high_error_rate",
            Self::SlowResponseTime => "slow_response_time",
            Self::HighCpuUsage => "high_cpu_usage",
            Self::HighMemoryUsage => "high_memory_usage",
            Self::HighDiskUsage => "high_disk_usage",
        }
    }

    pub fn severity(&self) -> AlertSeverity {
        match self {
            Self::SlowResponseTime | Self::HighCpuUsage => AlertSeverity::Warning,
            Self::HighErrorRate | Self::HighMemoryUsage | Self::HighDiskUsage => {
                AlertSeverity::Critical
            }
        }
    }

    /// Configured limit for this kind
    pub fn threshold(&self, thresholds: &AlertThresholds) -> f64 {
        match self {
            Self::HighErrorRate => thresholds.error_rate,
            Self::SlowResponseTime => thresholds.response_time_p95,
            Self::HighCpuUsage => thresholds.cpu_percent,
            Self::HighMemoryUsage => thresholds.memory_percent,
            Self::HighDiskUsage => thresholds.disk_percent,
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A threshold breach, either fired or merely observed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub message: String,
    pub current_value: f64,
    pub threshold: f64,
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    pub fn new(
        kind: AlertKind,
        message: String,
        current_value: f64,
        threshold: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            severity: kind.severity(),
            message,
            current_value,
            threshold,
            timestamp,
        }
    }
}

/// Alert statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct AlertStats {
    pub total_alerts: u64,
    pub alerts_by_severity: HashMap<String, u64>,
    pub alerts_by_kind: HashMap<String, u64>,
    /// Breaches skipped because the kind was cooling down
    pub suppressed: u64,
    /// Conditions that could not be evaluated
    pub failed_checks: u64,
    pub failed_notifications: u64,
    pub last_alert: Option<DateTime<Utc>>,
}

/// Consolidated alert storage - single lock for history, cooldowns and stats
#[derive(Debug, Default)]
pub(super) struct AlertStorage {
    pub(super) history: VecDeque<Alert>,
    pub(super) last_fired: HashMap<AlertKind, DateTime<Utc>>,
    pub(super) stats: AlertStats,
}
