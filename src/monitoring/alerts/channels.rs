//! Notification channel implementations

use super::types::{Alert, AlertSeverity};
use crate::utils::error::{GatewayError, Result};
use std::time::Duration;
use tracing::{error, warn};

/// Notification channel trait
#[async_trait::async_trait]
pub trait NotificationChannel: Send + Sync + std::fmt::Debug {
    /// Send a notification
    async fn send(&self, alert: &Alert) -> Result<()>;

    /// Get channel name
    fn name(&self) -> &str;

    /// Check if channel supports severity level
    fn supports_severity(&self, severity: AlertSeverity) -> bool;
}

/// Writes every alert to the log; critical alerts at error level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogChannel;

#[async_trait::async_trait]
impl NotificationChannel for LogChannel {
    async fn send(&self, alert: &Alert) -> Result<()> {
        match alert.severity {
            AlertSeverity::Critical => error!(
                alert_type = alert.kind.as_str(),
                severity = "critical",
                "ALERT [{}] {}: {}",
                alert.severity,
                alert.kind,
                alert.message
            ),
            AlertSeverity::Warning => warn!(
                alert_type = alert.kind.as_str(),
                severity = "warning",
                "ALERT [{}] {}: {}",
                alert.severity,
                alert.kind,
                alert.message
            ),
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }

    fn supports_severity(&self, _severity: AlertSeverity) -> bool {
        true
    }
}

/// Posts each alert as JSON to an HTTP endpoint
#[derive(Debug)]
pub struct WebhookChannel {
    url: String,
    client: reqwest::Client,
    min_severity: AlertSeverity,
}

impl WebhookChannel {
    pub fn new(url: impl Into<String>, min_severity: AlertSeverity) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            url: url.into(),
            client,
            min_severity,
        })
    }
}

#[async_trait::async_trait]
impl NotificationChannel for WebhookChannel {
    async fn send(&self, alert: &Alert) -> Result<()> {
        let payload = serde_json::json!({
            "alert_type": alert.kind,
            "severity": alert.severity,
            "message": alert.message,
            "current_value": alert.current_value,
            "threshold": alert.threshold,
            "timestamp": alert.timestamp,
            "id": alert.id,
            "source": "kitchen-monitor",
        });

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| GatewayError::alert(format!("Failed to send webhook notification: {}", e)))?;

        if !response.status().is_success() {
            return Err(GatewayError::alert(format!(
                "Alert webhook returned status: {}",
                response.status()
            )));
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "webhook"
    }

    fn supports_severity(&self, severity: AlertSeverity) -> bool {
        severity >= self.min_severity
    }
}
