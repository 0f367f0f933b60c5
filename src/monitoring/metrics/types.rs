//! Types for metrics storage and aggregated views

use crate::monitoring::types::{EndpointStat, RequestRecord, SystemSnapshot, UserActivity};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

/// Consolidated metrics storage - single lock for all buffers and aggregates
#[derive(Debug, Default)]
pub(super) struct MetricsStorage {
    pub(super) requests: VecDeque<RequestRecord>,
    pub(super) snapshots: VecDeque<SystemSnapshot>,
    pub(super) endpoint_stats: HashMap<String, EndpointStat>,
    pub(super) user_activity: HashMap<i64, UserActivity>,
    pub(super) error_counts: HashMap<String, u64>,
}

/// One resource sample taken from the host
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourceUsage {
    pub cpu_percent: f64,
    pub memory: MemoryUsage,
    pub disk: DiskUsage,
    pub network: NetworkCounters,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MemoryUsage {
    pub total_mb: f64,
    pub used_mb: f64,
    pub available_mb: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiskUsage {
    pub total_gb: f64,
    pub used_gb: f64,
    pub free_gb: f64,
    pub percent: f64,
}

/// Cumulative interface counters since boot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NetworkCounters {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
}

/// Result of a windowed summary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricsSummary {
    NoData { message: String },
    Report(SummaryReport),
}

impl MetricsSummary {
    pub fn report(&self) -> Option<&SummaryReport> {
        match self {
            Self::Report(report) => Some(report),
            Self::NoData { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub period_hours: u32,
    pub total_requests: usize,
    pub error_rate: f64,
    pub response_times: ResponseTimeStats,
    /// At most ten `(endpoint, count)` pairs, busiest first
    pub top_endpoints: Vec<(String, u64)>,
    pub error_breakdown: HashMap<String, u64>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ResponseTimeStats {
    pub avg: f64,
    pub p95: f64,
    pub p99: f64,
}
