//! Metrics collector implementation for recording requests and snapshots

use super::bounded::BoundedPush;
use super::helpers::average;
use super::system::ResourceSampler;
use super::types::{MetricsStorage, ResourceUsage};
use crate::config::MonitoringConfig;
use crate::monitoring::types::{RequestRecord, SystemSnapshot};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::debug;

/// Bounded store of recent requests and system snapshots
#[derive(Debug)]
pub struct MetricsCollector {
    /// All buffers and aggregates behind one lock
    pub(super) storage: Mutex<MetricsStorage>,
    pub(super) request_capacity: usize,
    pub(super) snapshot_capacity: usize,
    pub(super) started_at: DateTime<Utc>,
    pub(super) start_time: Instant,
    /// Requests currently inside the interceptor
    pub(super) in_flight: AtomicUsize,
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new(config: &MonitoringConfig) -> Self {
        Self::with_capacity(config.request_history, config.snapshot_history)
    }

    pub fn with_capacity(request_capacity: usize, snapshot_capacity: usize) -> Self {
        Self {
            storage: Mutex::new(MetricsStorage::default()),
            request_capacity: request_capacity.max(1),
            snapshot_capacity: snapshot_capacity.max(1),
            started_at: Utc::now(),
            start_time: Instant::now(),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Ingest one completed request
    pub fn record_request(&self, record: RequestRecord) {
        let key = record.endpoint_key();
        let is_error = record.is_error();

        let mut storage = self.storage.lock();

        let endpoint = storage.endpoint_stats.entry(key).or_default();
        endpoint.count += 1;
        endpoint.total_time += record.duration;
        endpoint.last_accessed = Some(record.timestamp);
        if is_error {
            endpoint.error_count += 1;
        }

        if let Some(user_id) = record.user_id {
            let activity = storage.user_activity.entry(user_id).or_default();
            activity.request_count += 1;
            activity.last_activity = Some(record.timestamp);
            if is_error {
                activity.error_count += 1;
            }
        }

        if is_error {
            if let Some(code) = &record.error_code {
                *storage.error_counts.entry(code.clone()).or_insert(0) += 1;
            }
        }

        let capacity = self.request_capacity;
        storage.requests.push_bounded(record, capacity);
    }

    /// Sample resources and append a snapshot stamped with the current time
    pub fn record_system_snapshot(&self, sampler: &dyn ResourceSampler) -> Result<SystemSnapshot> {
        self.record_system_snapshot_at(sampler, Utc::now())
    }

    pub fn record_system_snapshot_at(
        &self,
        sampler: &dyn ResourceSampler,
        now: DateTime<Utc>,
    ) -> Result<SystemSnapshot> {
        let usage = sampler.sample()?;
        Ok(self.record_usage_at(&usage, now))
    }

    /// Append a snapshot built from a reading taken elsewhere
    pub fn record_usage_at(&self, usage: &ResourceUsage, now: DateTime<Utc>) -> SystemSnapshot {
        let recent = self.requests_since(now - chrono::Duration::seconds(60));
        let durations: Vec<f64> = recent.iter().map(|r| r.duration).collect();

        let snapshot = SystemSnapshot {
            timestamp: now,
            cpu_percent: usage.cpu_percent,
            memory_percent: usage.memory.percent,
            memory_mb: usage.memory.used_mb,
            disk_percent: usage.disk.percent,
            active_connections: self.active_connections() as u64,
            request_count: recent.len(),
            error_count: recent.iter().filter(|r| r.is_error()).count(),
            avg_response_time: average(&durations),
        };

        debug!(
            "Recorded system snapshot: cpu={:.1}% memory={:.1}% requests={}",
            snapshot.cpu_percent, snapshot.memory_percent, snapshot.request_count
        );

        let capacity = self.snapshot_capacity;
        self.storage
            .lock()
            .snapshots
            .push_bounded(snapshot.clone(), capacity);

        snapshot
    }

    /// Mark a request as started
    #[inline]
    pub fn request_started(&self) {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
    }

    /// Mark a request as finished
    #[inline]
    pub fn request_finished(&self) {
        let _ = self
            .in_flight
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
    }

    #[inline]
    pub fn active_connections(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn request_capacity(&self) -> usize {
        self.request_capacity
    }

    pub fn snapshot_capacity(&self) -> usize {
        self.snapshot_capacity
    }
}
