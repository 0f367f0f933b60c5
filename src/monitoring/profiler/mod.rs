//! Named-operation timing
//!
//! Keeps the most recent timings for each operation name and reports
//! percentile statistics over them.

mod timer;


pub use timer::OperationTimer;

use super::metrics::BoundedPush;
use super::metrics::helpers::{average, percentile, sort_ascending};
use crate::config::ProfilerConfig;
use dashmap::DashMap;
use serde::Serialize;
use std::collections::VecDeque;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::warn;

/// Statistics for one operation; only `count` is present when nothing was recorded
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OperationStats {
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p50: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p95: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p99: Option<f64>,
}

/// Per-operation timing history
#[derive(Debug)]
pub struct PerformanceProfiler {
    timings: DashMap<String, VecDeque<f64>>,
    max_samples: usize,
    slow_threshold: f64,
}

impl PerformanceProfiler {
    pub fn new(config: &ProfilerConfig) -> Self {
        Self {
            timings: DashMap::new(),
            max_samples: config.max_samples.max(1),
            slow_threshold: config.slow_threshold_secs,
        }
    }

    /// Store one timing, warning when it exceeds the slow threshold
    pub fn record_operation(&self, name: &str, duration: Duration) {
        let secs = duration.as_secs_f64();

        self.timings
            .entry(name.to_string())
            .or_default()
            .push_bounded(secs, self.max_samples);

        if secs > self.slow_threshold {
            warn!("Slow operation detected: {} took {:.3}s", name, secs);
        }
    }

    pub fn get_operation_stats(&self, name: &str) -> OperationStats {
        let mut samples: Vec<f64> = match self.timings.get(name) {
            Some(timings) => timings.iter().copied().collect(),
            None => return OperationStats::default(),
        };
        if samples.is_empty() {
            return OperationStats::default();
        }

        sort_ascending(&mut samples);
        let len = samples.len();

        OperationStats {
            count: len,
            avg: Some(average(&samples)),
            min: samples.first().copied(),
            max: samples.last().copied(),
            p50: Some(samples[len / 2]),
            p95: Some(percentile(&samples, 0.95)),
            p99: Some(percentile(&samples, 0.99)),
        }
    }

    /// Names of every operation with at least one timing
    pub fn operations(&self) -> Vec<String> {
        let mut names: Vec<String> = self.timings.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Start a guard that records the elapsed time when dropped
    pub fn start_timer<'a>(&'a self, name: &str) -> OperationTimer<'a> {
        OperationTimer::new(self, name)
    }

    /// Await `future` and record how long it took
    pub async fn time_operation<F, T>(&self, name: &str, future: F) -> T
    where
        F: Future<Output = T>,
    {
        let start = Instant::now();
        let output = future.await;
        self.record_operation(name, start.elapsed());
        output
    }
}
