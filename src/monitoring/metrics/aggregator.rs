//! Windowed summaries over buffered requests

use super::collector::MetricsCollector;
use super::helpers::{average, percentile, sort_ascending};
use super::types::{MetricsSummary, ResponseTimeStats, SummaryReport};
use crate::monitoring::types::RequestRecord;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

const TOP_ENDPOINTS: usize = 10;

impl MetricsCollector {
    /// Summarize the last `hours` hours of traffic
    pub fn get_metrics_summary(&self, hours: u32) -> MetricsSummary {
        self.get_metrics_summary_at(hours, Utc::now())
    }

    pub fn get_metrics_summary_at(&self, hours: u32, now: DateTime<Utc>) -> MetricsSummary {
        let cutoff = now - chrono::Duration::hours(i64::from(hours));
        let records = self.requests_since(cutoff);
        summarize(&records, hours, now)
    }
}

/// Pure summary over a set of records
pub fn summarize(records: &[RequestRecord], hours: u32, now: DateTime<Utc>) -> MetricsSummary {
    if records.is_empty() {
        return MetricsSummary::NoData {
            message: "No data available for the specified period".to_string(),
        };
    }

    let total = records.len();
    let errors = records.iter().filter(|r| r.is_error()).count();

    let mut durations: Vec<f64> = records.iter().map(|r| r.duration).collect();
    sort_ascending(&mut durations);

    let mut endpoint_counts: HashMap<String, u64> = HashMap::new();
    let mut error_breakdown: HashMap<String, u64> = HashMap::new();
    for record in records {
        *endpoint_counts.entry(record.endpoint_key()).or_insert(0) += 1;
        if let Some(code) = record.error_code.as_ref().filter(|_| record.is_error()) {
            *error_breakdown.entry(code.clone()).or_insert(0) += 1;
        }
    }

    let mut top_endpoints: Vec<(String, u64)> = endpoint_counts.into_iter().collect();
    top_endpoints.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top_endpoints.truncate(TOP_ENDPOINTS);

    MetricsSummary::Report(SummaryReport {
        period_hours: hours,
        total_requests: total,
        error_rate: errors as f64 / total as f64,
        response_times: ResponseTimeStats {
            avg: average(&durations),
            p95: percentile(&durations, 0.95),
            p99: percentile(&durations, 0.99),
        },
        top_endpoints,
        error_breakdown,
        timestamp: now,
    })
}
