//! Core MonitoringSystem implementation

use super::alerts::AlertManager;
use super::background::BackgroundTask;
use super::health::{self, HealthReport};
use super::metrics::{
    MetricsCollector, MetricsSummary, ResourceSampler, ResourceUsage, default_sampler,
};
use super::profiler::{OperationStats, PerformanceProfiler};
use super::types::{RequestRecord, SystemSnapshot};
use crate::config::MonitoringConfig;
use crate::utils::error::{GatewayError, Result};
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Owns the collector, alert manager, profiler and sampler for one process
#[derive(Debug)]
pub struct MonitoringSystem {
    config: MonitoringConfig,
    metrics: Arc<MetricsCollector>,
    alerts: Arc<AlertManager>,
    profiler: Arc<PerformanceProfiler>,
    sampler: Arc<dyn ResourceSampler>,
    background: Mutex<Option<BackgroundTask>>,
}

impl MonitoringSystem {
    /// Create a new monitoring system using the host sampler
    pub fn new(config: &MonitoringConfig) -> Result<Self> {
        Self::with_sampler(config, default_sampler())
    }

    pub fn with_sampler(
        config: &MonitoringConfig,
        sampler: Arc<dyn ResourceSampler>,
    ) -> Result<Self> {
        let alerts = AlertManager::new(&config.alerts)?;
        Ok(Self::from_parts(config, alerts, sampler))
    }

    /// Assemble from an already-built alert manager
    pub fn from_parts(
        config: &MonitoringConfig,
        alerts: AlertManager,
        sampler: Arc<dyn ResourceSampler>,
    ) -> Self {
        Self {
            config: config.clone(),
            metrics: Arc::new(MetricsCollector::new(config)),
            alerts: Arc::new(alerts),
            profiler: Arc::new(PerformanceProfiler::new(&config.profiler)),
            sampler,
            background: Mutex::new(None),
        }
    }

    /// Start the periodic collection task; a second call is a no-op
    pub fn start(self: &Arc<Self>) {
        let mut background = self.background.lock();
        if background.is_some() {
            debug!("Monitoring background task already running");
            return;
        }

        let period = Duration::from_secs(self.config.collection_interval_secs);
        info!("Starting monitoring background task every {:?}", period);
        *background = Some(BackgroundTask::spawn(Arc::clone(self), period));
    }

    /// Start with an explicit period
    pub fn start_with_period(self: &Arc<Self>, period: Duration) {
        let mut background = self.background.lock();
        if background.is_none() {
            *background = Some(BackgroundTask::spawn(Arc::clone(self), period));
        }
    }

    /// Stop the periodic collection task and wait for it to exit
    pub async fn stop(&self) {
        let task = self.background.lock().take();
        if let Some(task) = task {
            info!("Stopping monitoring background task");
            task.shutdown().await;
        }
    }

    pub fn is_running(&self) -> bool {
        self.background
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// One tick: snapshot, then alert checks; failures are logged and skipped
    pub async fn run_collection_cycle(&self) {
        match self.sample_resources().await {
            Ok(usage) => {
                self.metrics.record_usage_at(&usage, Utc::now());
            }
            Err(e) => error!("Failed to record system metrics: {}", e),
        }

        if self.config.alerts.enabled {
            let health = self.get_health_status();
            let fired = self.alerts.check_alerts(&health);
            if !fired.is_empty() {
                self.alerts.notify(&fired).await;
            }
        }
    }

    pub fn record_request(&self, record: RequestRecord) {
        self.metrics.record_request(record);
    }

    pub fn record_system_snapshot(&self) -> Result<SystemSnapshot> {
        self.metrics.record_system_snapshot(self.sampler.as_ref())
    }

    pub fn get_health_status(&self) -> HealthReport {
        health::evaluate(&self.metrics, Utc::now())
    }

    pub fn get_metrics_summary(&self, hours: u32) -> MetricsSummary {
        self.metrics.get_metrics_summary(hours)
    }

    pub fn get_operation_stats(&self, name: &str) -> OperationStats {
        self.profiler.get_operation_stats(name)
    }

    /// Fresh reading from the sampler, taken on the blocking pool
    pub async fn sample_resources(&self) -> Result<ResourceUsage> {
        let sampler = Arc::clone(&self.sampler);
        tokio::task::spawn_blocking(move || sampler.sample())
            .await
            .map_err(|e| GatewayError::sampling(format!("Sampling task failed: {}", e)))?
    }

    pub fn metrics(&self) -> &Arc<MetricsCollector> {
        &self.metrics
    }

    pub fn alerts(&self) -> &Arc<AlertManager> {
        &self.alerts
    }

    pub fn profiler(&self) -> &Arc<PerformanceProfiler> {
        &self.profiler
    }

    pub fn config(&self) -> &MonitoringConfig {
        &self.config
    }
}
