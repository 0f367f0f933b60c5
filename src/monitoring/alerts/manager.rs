//! Alert manager implementation

use super::channels::{LogChannel, NotificationChannel, WebhookChannel};
use super::processing::evaluate;
use super::types::{Alert, AlertKind, AlertSeverity, AlertStats, AlertStorage};
use crate::config::{AlertThresholds, AlertingConfig, MAX_ALERT_COOLDOWN_SECS};
use crate::monitoring::health::HealthReport;
use crate::monitoring::metrics::BoundedPush;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Fired alerts kept for the dashboard
pub const ALERT_HISTORY_LIMIT: usize = 1000;

/// Checks health metrics against thresholds with per-kind cooldown
#[derive(Debug)]
pub struct AlertManager {
    thresholds: AlertThresholds,
    cooldown: chrono::Duration,
    /// Consolidated storage for all alert-related data
    pub(super) storage: RwLock<AlertStorage>,
    channels: Vec<Arc<dyn NotificationChannel>>,
}

impl AlertManager {
    /// Create a new alert manager logging every alert, plus a webhook channel
    /// when one is configured
    pub fn new(config: &AlertingConfig) -> Result<Self> {
        let mut channels: Vec<Arc<dyn NotificationChannel>> = vec![Arc::new(LogChannel)];
        if let Some(url) = &config.webhook_url {
            channels.push(Arc::new(WebhookChannel::new(
                url.clone(),
                AlertSeverity::Warning,
            )?));
        }
        Ok(Self::with_channels(config, channels))
    }

    pub fn with_channels(
        config: &AlertingConfig,
        channels: Vec<Arc<dyn NotificationChannel>>,
    ) -> Self {
        Self {
            thresholds: config.thresholds,
            cooldown: chrono::Duration::seconds(
                config.cooldown_secs.min(MAX_ALERT_COOLDOWN_SECS) as i64,
            ),
            storage: RwLock::new(AlertStorage::default()),
            channels,
        }
    }

    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    /// Evaluate every condition and fire those not cooling down
    pub fn check_alerts(&self, health: &HealthReport) -> Vec<Alert> {
        self.check_alerts_at(health, Utc::now())
    }

    pub fn check_alerts_at(&self, health: &HealthReport, now: DateTime<Utc>) -> Vec<Alert> {
        let mut fired = Vec::new();

        for kind in AlertKind::ALL {
            match evaluate(kind, &health.metrics, &self.thresholds, now) {
                Ok(Some(alert)) => {
                    if self.try_fire(&alert, now) {
                        fired.push(alert);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    error!("Failed to check {} alert: {}", kind, e);
                    self.storage.write().stats.failed_checks += 1;
                }
            }
        }

        fired
    }

    /// Conditions currently over threshold, ignoring cooldown
    pub fn current_alerts(&self, health: &HealthReport) -> Vec<Alert> {
        let now = Utc::now();
        AlertKind::ALL
            .into_iter()
            .filter_map(|kind| {
                evaluate(kind, &health.metrics, &self.thresholds, now)
                    .ok()
                    .flatten()
            })
            .collect()
    }

    /// Record the alert unless its kind fired within the cooldown window
    fn try_fire(&self, alert: &Alert, now: DateTime<Utc>) -> bool {
        let mut storage = self.storage.write();

        if let Some(last) = storage.last_fired.get(&alert.kind) {
            if now - *last < self.cooldown {
                debug!("Alert {} suppressed by cooldown", alert.kind);
                storage.stats.suppressed += 1;
                return false;
            }
        }

        storage.last_fired.insert(alert.kind, now);

        storage.stats.total_alerts += 1;
        *storage
            .stats
            .alerts_by_severity
            .entry(alert.severity.to_string().to_lowercase())
            .or_insert(0) += 1;
        *storage
            .stats
            .alerts_by_kind
            .entry(alert.kind.to_string())
            .or_insert(0) += 1;
        storage.stats.last_alert = Some(now);

        storage.history.push_bounded(alert.clone(), ALERT_HISTORY_LIMIT);
        drop(storage);

        debug!("Alert {} fired: {}", alert.kind, alert.message);

        true
    }

    /// Deliver fired alerts to every channel; failures are counted, not returned
    pub async fn notify(&self, alerts: &[Alert]) {
        for alert in alerts {
            for channel in &self.channels {
                if !channel.supports_severity(alert.severity) {
                    continue;
                }
                if let Err(e) = channel.send(alert).await {
                    error!(
                        "Failed to deliver alert {} via {}: {}",
                        alert.id,
                        channel.name(),
                        e
                    );
                    self.storage.write().stats.failed_notifications += 1;
                }
            }
        }
    }

    /// Log an operator acknowledgement
    pub fn acknowledge(&self, alert_type: &str, acknowledged_by: &str) {
        info!(
            alert_type = alert_type,
            acknowledged_by = acknowledged_by,
            "Alert {} acknowledged by {}",
            alert_type,
            acknowledged_by
        );
    }

    pub fn last_fired(&self, kind: AlertKind) -> Option<DateTime<Utc>> {
        self.storage.read().last_fired.get(&kind).copied()
    }

    /// Get alert statistics
    pub fn get_stats(&self) -> AlertStats {
        self.storage.read().stats.clone()
    }

    /// Most recent fired alerts, newest first
    pub fn get_history(&self, limit: Option<usize>) -> Vec<Alert> {
        let storage = self.storage.read();
        let limit = limit.unwrap_or(100);

        storage.history.iter().rev().take(limit).cloned().collect()
    }

    /// Fired alerts at or after `cutoff`, newest first
    pub fn history_since(&self, cutoff: DateTime<Utc>) -> Vec<Alert> {
        let storage = self.storage.read();
        storage
            .history
            .iter()
            .rev()
            .filter(|a| a.timestamp >= cutoff)
            .cloned()
            .collect()
    }
}
