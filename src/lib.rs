//! # kitchen-monitor
//!
//! Kitchen management API backend with an in-process monitoring subsystem:
//! bounded request and resource metrics, health classification, threshold
//! alerting with cooldown, and an authenticated monitoring dashboard.
//!
//! ## Embedding the monitoring core
//!
//! ```rust,no_run
//! use kitchen_monitor::config::MonitoringConfig;
//! use kitchen_monitor::monitoring::{MonitoringSystem, RequestRecord};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let monitoring = Arc::new(MonitoringSystem::new(&MonitoringConfig::default())?);
//!     monitoring.start();
//!
//!     monitoring.record_request(RequestRecord::new(
//!         "GET",
//!         "/kitchens",
//!         200,
//!         Duration::from_millis(42),
//!     ));
//!     println!("{:?}", monitoring.get_health_status().status);
//!
//!     monitoring.stop().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Running the server
//!
//! ```rust,no_run
//! use kitchen_monitor::{Config, server::run_server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/kitchen-monitor.yaml").await?;
//!     run_server(config).await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod monitoring;
pub mod server;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use monitoring::MonitoringSystem;
pub use utils::error::{GatewayError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Build metadata recorded by the build script
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    /// Seconds since the Unix epoch
    pub build_time: &'static str,
    pub git_hash: &'static str,
}

/// Build information for this binary
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: VERSION,
        build_time: env!("BUILD_TIME"),
        git_hash: env!("GIT_HASH"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info() {
        let info = build_info();
        assert_eq!(info.version, VERSION);
        assert!(!info.git_hash.is_empty());
        assert!(info.build_time.parse::<u64>().is_ok());
    }

    #[test]
    fn test_constants() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
        assert_eq!(NAME, "kitchen-monitor");
    }
}
