//! Health classification from the latest snapshot and recent error rate

use super::types::{HealthMetrics, HealthReport, HealthState};
use crate::monitoring::metrics::MetricsCollector;
use crate::monitoring::types::{RequestRecord, SystemSnapshot};
use chrono::{DateTime, Utc};
use std::time::Duration;

pub const CPU_DEGRADED_PERCENT: f64 = 80.0;
pub const MEMORY_DEGRADED_PERCENT: f64 = 85.0;
pub const ERROR_RATE_UNHEALTHY: f64 = 0.1;
/// Trailing window for the error rate
pub const HEALTH_WINDOW_SECS: i64 = 300;

/// Evaluate the collector's current state
pub fn evaluate(collector: &MetricsCollector, now: DateTime<Utc>) -> HealthReport {
    let snapshot = collector.latest_snapshot();
    let recent = collector.requests_since(now - chrono::Duration::seconds(HEALTH_WINDOW_SECS));
    classify(snapshot.as_ref(), &recent, collector.uptime(), now)
}

/// Pure classification; every triggered condition adds an issue and the worst state wins
pub fn classify(
    snapshot: Option<&SystemSnapshot>,
    recent: &[RequestRecord],
    uptime: Duration,
    now: DateTime<Utc>,
) -> HealthReport {
    let mut status = HealthState::Healthy;
    let mut issues = Vec::new();

    let mut metrics = HealthMetrics {
        requests_last_5min: recent.len(),
        ..HealthMetrics::default()
    };

    if let Some(snapshot) = snapshot {
        metrics.cpu_percent = Some(snapshot.cpu_percent);
        metrics.memory_percent = Some(snapshot.memory_percent);
        metrics.disk_percent = Some(snapshot.disk_percent);
        metrics.avg_response_time = Some(snapshot.avg_response_time);

        if snapshot.cpu_percent > CPU_DEGRADED_PERCENT {
            status.escalate(HealthState::Degraded);
            issues.push("High CPU usage".to_string());
        }
        if snapshot.memory_percent > MEMORY_DEGRADED_PERCENT {
            status.escalate(HealthState::Degraded);
            issues.push("High memory usage".to_string());
        }
    }

    if !recent.is_empty() {
        let errors = recent.iter().filter(|r| r.is_error()).count();
        metrics.error_rate = errors as f64 / recent.len() as f64;

        if metrics.error_rate > ERROR_RATE_UNHEALTHY {
            status.escalate(HealthState::Unhealthy);
            issues.push("High error rate".to_string());
        }
    }

    HealthReport {
        status,
        timestamp: now,
        uptime_seconds: uptime.as_secs_f64(),
        issues,
        metrics,
    }
}
