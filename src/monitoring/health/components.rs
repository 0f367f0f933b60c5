//! Per-component breakdown for the detailed health view

use super::checker::HEALTH_WINDOW_SECS;
use super::types::{HealthMetrics, HealthReport, HealthState};
use crate::monitoring::metrics::MetricsCollector;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 5xx share of recent traffic at which the application counts as degraded
pub const SERVER_ERROR_RATE_DEGRADED: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseHealth {
    pub status: HealthState,
    pub message: String,
}

impl DatabaseHealth {
    pub fn connected() -> Self {
        Self {
            status: HealthState::Healthy,
            message: "Database connection successful".to_string(),
        }
    }

    pub fn failed(reason: impl std::fmt::Display) -> Self {
        Self {
            status: HealthState::Unhealthy,
            message: format!("Database connection failed: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemMetricsHealth {
    pub status: HealthState,
    pub metrics: HealthMetrics,
    pub issues: Vec<String>,
}

impl From<HealthReport> for SystemMetricsHealth {
    fn from(report: HealthReport) -> Self {
        Self {
            status: report.status,
            metrics: report.metrics,
            issues: report.issues,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationHealth {
    pub status: HealthState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_requests: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApplicationHealth {
    /// Server-error rate over the health window
    pub fn evaluate(collector: &MetricsCollector, now: DateTime<Utc>) -> Self {
        let recent =
            collector.requests_since(now - chrono::Duration::seconds(HEALTH_WINDOW_SECS));

        if recent.is_empty() {
            return Self {
                status: HealthState::Healthy,
                error_rate: None,
                total_requests: None,
                error_count: None,
                message: Some("No recent requests to analyze".to_string()),
            };
        }

        let error_count = recent.iter().filter(|r| r.status_code >= 500).count();
        let error_rate = error_count as f64 / recent.len() as f64;

        Self {
            status: if error_rate < SERVER_ERROR_RATE_DEGRADED {
                HealthState::Healthy
            } else {
                HealthState::Degraded
            },
            error_rate: Some(error_rate),
            total_requests: Some(recent.len()),
            error_count: Some(error_count),
            message: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthComponents {
    pub database: DatabaseHealth,
    pub system_metrics: SystemMetricsHealth,
    pub application: ApplicationHealth,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedHealth {
    pub timestamp: DateTime<Utc>,
    pub overall_status: HealthState,
    pub components: HealthComponents,
}

impl DetailedHealth {
    /// A failed database makes the whole service unhealthy; a non-healthy
    /// system evaluation degrades it
    pub fn assemble(
        database: DatabaseHealth,
        system: HealthReport,
        application: ApplicationHealth,
        now: DateTime<Utc>,
    ) -> Self {
        let mut overall_status = HealthState::Healthy;
        if database.status == HealthState::Unhealthy {
            overall_status.escalate(HealthState::Unhealthy);
        }
        if !system.status.is_healthy() {
            overall_status.escalate(HealthState::Degraded);
        }

        Self {
            timestamp: now,
            overall_status,
            components: HealthComponents {
                database,
                system_metrics: system.into(),
                application,
            },
        }
    }
}
