//! Threshold evaluation for each alert kind

use super::types::{Alert, AlertKind};
use crate::config::AlertThresholds;
use crate::monitoring::health::HealthMetrics;
use crate::utils::error::{GatewayError, Result};
use chrono::{DateTime, Utc};

/// Check one condition. `Ok(None)` means within limits or no reading yet.
pub(super) fn evaluate(
    kind: AlertKind,
    metrics: &HealthMetrics,
    thresholds: &AlertThresholds,
    now: DateTime<Utc>,
) -> Result<Option<Alert>> {
    let value = match kind {
        AlertKind::HighErrorRate => Some(metrics.error_rate),
        AlertKind::SlowResponseTime => metrics.avg_response_time,
        AlertKind::HighCpuUsage => metrics.cpu_percent,
        AlertKind::HighMemoryUsage => metrics.memory_percent,
        AlertKind::HighDiskUsage => metrics.disk_percent,
    };
    let Some(value) = value else {
        return Ok(None);
    };

    if !value.is_finite() {
        return Err(GatewayError::alert(format!(
            "{} reading is not a finite number",
            kind
        )));
    }

    let threshold = kind.threshold(thresholds);
    if value <= threshold {
        return Ok(None);
    }

    Ok(Some(Alert::new(
        kind,
        message(kind, value, threshold),
        value,
        threshold,
        now,
    )))
}

fn message(kind: AlertKind, value: f64, threshold: f64) -> String {
    match kind {
        AlertKind::HighErrorRate => format!(
            "Error rate is {:.2}%, threshold is {:.2}%",
            value * 100.0,
            threshold * 100.0
        ),
        AlertKind::SlowResponseTime => format!(
            "Average response time is {:.3}s, threshold is {}s",
            value, threshold
        ),
        AlertKind::HighCpuUsage => {
            format!("CPU usage is {:.1}%, threshold is {}%", value, threshold)
        }
        AlertKind::HighMemoryUsage => {
            format!("Memory usage is {:.1}%, threshold is {}%", value, threshold)
        }
        AlertKind::HighDiskUsage => {
            format!("Disk usage is {:.1}%, threshold is {}%", value, threshold)
        }
    }
}
