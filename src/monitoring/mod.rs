//! Monitoring and observability system
//!
//! Bounded request/snapshot metrics, health classification, threshold
//! alerting with cooldown and named-operation profiling.

pub mod alerts;
pub mod health;
pub mod metrics;
pub mod profiler;

mod background;
mod system;
mod types;


pub use alerts::{Alert, AlertKind, AlertManager, AlertSeverity};
pub use background::BackgroundTask;
pub use health::{HealthReport, HealthState};
pub use metrics::{MetricsCollector, MetricsSummary, ResourceSampler, StaticSampler};
pub use profiler::{OperationStats, OperationTimer, PerformanceProfiler};
pub use system::MonitoringSystem;
pub use types::{EndpointStat, RequestRecord, SystemSnapshot, UserActivity};
