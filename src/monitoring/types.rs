//! Type definitions for request records, snapshots and running aggregates

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// One completed HTTP request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestRecord {
    pub timestamp: DateTime<Utc>,
    pub method: String,
    pub path: String,
    pub status_code: u16,
    /// Seconds from receipt to completion
    pub duration: f64,
    pub user_id: Option<i64>,
    pub error_code: Option<String>,
}

impl RequestRecord {
    /// Create a record stamped with the current time
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        status_code: u16,
        duration: Duration,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            method: method.into(),
            path: path.into(),
            status_code,
            duration: duration.as_secs_f64(),
            user_id: None,
            error_code: None,
        }
    }

    pub fn with_user(mut self, user_id: Option<i64>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_error_code(mut self, error_code: Option<String>) -> Self {
        self.error_code = error_code;
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Status 400 and above counts as an error
    #[inline]
    pub fn is_error(&self) -> bool {
        self.status_code >= 400
    }

    /// Key used for per-endpoint aggregation
    pub fn endpoint_key(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// Resource usage and trailing-minute traffic at one collection tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemSnapshot {
    pub timestamp: DateTime<Utc>,
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub memory_mb: f64,
    pub disk_percent: f64,
    pub active_connections: u64,
    /// Requests seen in the trailing 60 seconds
    pub request_count: usize,
    pub error_count: usize,
    pub avg_response_time: f64,
}

/// Running aggregate for one `METHOD path` key
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EndpointStat {
    pub count: u64,
    pub total_time: f64,
    pub error_count: u64,
    pub last_accessed: Option<DateTime<Utc>>,
}

impl EndpointStat {
    pub fn avg_response_time(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_time / self.count as f64
        }
    }

    pub fn error_rate(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.error_count as f64 / self.count as f64
        }
    }
}

/// Running aggregate for one authenticated user
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserActivity {
    pub request_count: u64,
    pub error_count: u64,
    pub last_activity: Option<DateTime<Utc>>,
}
