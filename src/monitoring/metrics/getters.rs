//! Read views over the collector
//!
//! Each view copies what it needs under the lock; filtering and sorting
//! happen on the copy.

use super::collector::MetricsCollector;
use crate::monitoring::types::{EndpointStat, RequestRecord, SystemSnapshot, UserActivity};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;

impl MetricsCollector {
    /// Requests with a timestamp at or after `cutoff`
    pub fn requests_since(&self, cutoff: DateTime<Utc>) -> Vec<RequestRecord> {
        let storage = self.storage.lock();
        storage
            .requests
            .iter()
            .filter(|r| r.timestamp >= cutoff)
            .cloned()
            .collect()
    }

    /// Every buffered request, oldest first
    pub fn requests(&self) -> Vec<RequestRecord> {
        self.storage.lock().requests.iter().cloned().collect()
    }

    pub fn snapshots_since(&self, cutoff: DateTime<Utc>) -> Vec<SystemSnapshot> {
        let storage = self.storage.lock();
        storage
            .snapshots
            .iter()
            .filter(|s| s.timestamp >= cutoff)
            .cloned()
            .collect()
    }

    /// The last `n` snapshots, oldest first
    pub fn recent_snapshots(&self, n: usize) -> Vec<SystemSnapshot> {
        let storage = self.storage.lock();
        let skip = storage.snapshots.len().saturating_sub(n);
        storage.snapshots.iter().skip(skip).cloned().collect()
    }

    pub fn latest_snapshot(&self) -> Option<SystemSnapshot> {
        self.storage.lock().snapshots.back().cloned()
    }

    pub fn endpoint_stats(&self) -> HashMap<String, EndpointStat> {
        self.storage.lock().endpoint_stats.clone()
    }

    pub fn endpoint_stat(&self, key: &str) -> Option<EndpointStat> {
        self.storage.lock().endpoint_stats.get(key).cloned()
    }

    pub fn user_activity(&self) -> HashMap<i64, UserActivity> {
        self.storage.lock().user_activity.clone()
    }

    /// Lifetime tally of error codes seen on failed requests
    pub fn error_counts(&self) -> HashMap<String, u64> {
        self.storage.lock().error_counts.clone()
    }

    pub fn request_len(&self) -> usize {
        self.storage.lock().requests.len()
    }

    pub fn snapshot_len(&self) -> usize {
        self.storage.lock().snapshots.len()
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
