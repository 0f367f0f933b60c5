//! Monitoring configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Monitoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    /// Capacity of the per-request record buffer
    #[serde(default = "default_request_history")]
    pub request_history: usize,
    /// Capacity of the system snapshot buffer
    #[serde(default = "default_snapshot_history")]
    pub snapshot_history: usize,
    /// Seconds between snapshot/alert ticks
    #[serde(default = "default_collection_interval")]
    pub collection_interval_secs: u64,
    /// Alerting configuration
    #[serde(default)]
    pub alerts: AlertingConfig,
    /// Operation profiler configuration
    #[serde(default)]
    pub profiler: ProfilerConfig,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            request_history: default_request_history(),
            snapshot_history: default_snapshot_history(),
            collection_interval_secs: default_collection_interval(),
            alerts: AlertingConfig::default(),
            profiler: ProfilerConfig::default(),
        }
    }
}

impl MonitoringConfig {
    /// Merge monitoring configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.request_history != default_request_history() {
            self.request_history = other.request_history;
        }
        if other.snapshot_history != default_snapshot_history() {
            self.snapshot_history = other.snapshot_history;
        }
        if other.collection_interval_secs != default_collection_interval() {
            self.collection_interval_secs = other.collection_interval_secs;
        }
        self.alerts = self.alerts.merge(other.alerts);
        self.profiler = self.profiler.merge(other.profiler);
        self
    }

    /// Validate monitoring configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.request_history == 0 {
            return Err("request_history must be greater than 0".to_string());
        }
        if self.snapshot_history == 0 {
            return Err("snapshot_history must be greater than 0".to_string());
        }
        if self.collection_interval_secs == 0 {
            return Err("collection_interval_secs must be greater than 0".to_string());
        }
        self.alerts.validate()?;
        self.profiler.validate()
    }
}

/// Static alert limits, read-only after startup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    /// Fraction of requests with status >= 400
    pub error_rate: f64,
    /// Response time limit in seconds
    pub response_time_p95: f64,
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub disk_percent: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            error_rate: 0.05,
            response_time_p95: 2.0,
            cpu_percent: 80.0,
            memory_percent: 85.0,
            disk_percent: 90.0,
        }
    }
}

impl AlertThresholds {
    fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.error_rate) {
            return Err("error_rate threshold must be between 0 and 1".to_string());
        }
        if self.response_time_p95 <= 0.0 {
            return Err("response_time_p95 threshold must be positive".to_string());
        }
        for (name, value) in [
            ("cpu_percent", self.cpu_percent),
            ("memory_percent", self.memory_percent),
            ("disk_percent", self.disk_percent),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(format!("{} threshold must be between 0 and 100", name));
            }
        }
        Ok(())
    }
}

/// Longest accepted alert cooldown (one week)
pub const MAX_ALERT_COOLDOWN_SECS: u64 = 7 * 24 * 60 * 60;

/// Alerting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertingConfig {
    /// Run alert checks on every collection tick
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Minimum seconds between two alerts of the same type
    #[serde(default = "default_alert_cooldown")]
    pub cooldown_secs: u64,
    /// Threshold overrides
    #[serde(default)]
    pub thresholds: AlertThresholds,
    /// Optional webhook receiving fired alerts as JSON
    pub webhook_url: Option<String>,
}

impl Default for AlertingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cooldown_secs: default_alert_cooldown(),
            thresholds: AlertThresholds::default(),
            webhook_url: None,
        }
    }
}

impl AlertingConfig {
    /// Merge alerting configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.enabled {
            self.enabled = other.enabled;
        }
        if other.cooldown_secs != default_alert_cooldown() {
            self.cooldown_secs = other.cooldown_secs;
        }
        if other.thresholds != AlertThresholds::default() {
            self.thresholds = other.thresholds;
        }
        if other.webhook_url.is_some() {
            self.webhook_url = other.webhook_url;
        }
        self
    }

    fn validate(&self) -> Result<(), String> {
        if self.cooldown_secs > MAX_ALERT_COOLDOWN_SECS {
            return Err(format!(
                "Alert cooldown cannot exceed {} seconds",
                MAX_ALERT_COOLDOWN_SECS
            ));
        }
        if let Some(url) = &self.webhook_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(format!("Alert webhook must be an http(s) URL: {}", url));
            }
        }
        self.thresholds.validate()
    }
}

/// Operation profiler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilerConfig {
    /// Operations slower than this many seconds are logged
    #[serde(default = "default_slow_operation_threshold")]
    pub slow_threshold_secs: f64,
    /// Timings retained per operation
    #[serde(default = "default_operation_history")]
    pub max_samples: usize,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            slow_threshold_secs: default_slow_operation_threshold(),
            max_samples: default_operation_history(),
        }
    }
}

impl ProfilerConfig {
    /// Merge profiler configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.slow_threshold_secs != default_slow_operation_threshold() {
            self.slow_threshold_secs = other.slow_threshold_secs;
        }
        if other.max_samples != default_operation_history() {
            self.max_samples = other.max_samples;
        }
        self
    }

    fn validate(&self) -> Result<(), String> {
        if self.max_samples == 0 {
            return Err("profiler max_samples must be greater than 0".to_string());
        }
        if self.slow_threshold_secs <= 0.0 {
            return Err("profiler slow_threshold_secs must be positive".to_string());
        }
        Ok(())
    }
}
