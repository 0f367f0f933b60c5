//! Health evaluation
//!
//! Classifies the service as healthy, degraded or unhealthy from the latest
//! system snapshot and the trailing five-minute error rate.

mod checker;
mod components;
mod types;


pub use checker::{
    CPU_DEGRADED_PERCENT, ERROR_RATE_UNHEALTHY, HEALTH_WINDOW_SECS, MEMORY_DEGRADED_PERCENT,
    classify, evaluate,
};
pub use components::{
    ApplicationHealth, DatabaseHealth, DetailedHealth, HealthComponents,
    SERVER_ERROR_RATE_DEGRADED, SystemMetricsHealth,
};
pub use types::{HealthMetrics, HealthReport, HealthState};
