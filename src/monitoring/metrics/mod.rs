//! Request and resource metrics
//!
//! A single collector owns the bounded request and snapshot buffers plus the
//! per-endpoint, per-user and per-error-code aggregates.

mod aggregator;
mod bounded;
mod collector;
mod getters;
pub mod helpers;
mod system;
mod types;


pub use aggregator::summarize;
pub(crate) use bounded::BoundedPush;
pub use collector::MetricsCollector;
#[cfg(feature = "metrics")]
pub use system::SysinfoSampler;
pub use system::{ResourceSampler, StaticSampler, UnavailableSampler, default_sampler};
pub use types::{
    DiskUsage, MemoryUsage, MetricsSummary, NetworkCounters, ResourceUsage, ResponseTimeStats,
    SummaryReport,
};
