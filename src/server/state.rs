//! Application state shared across HTTP handlers

use crate::auth::JwtHandler;
use crate::config::Config;
use crate::monitoring::MonitoringSystem;
use crate::storage::{self, Storage};
use crate::utils::error::Result;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Every field is behind an `Arc`, so cloning per worker is cheap. The
/// monitoring system is the single instance also driven by the background
/// collection task.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Metrics, health, alerts and profiler
    pub monitoring: Arc<MonitoringSystem>,
    /// Persistence collaborator
    pub storage: Arc<dyn Storage>,
    /// Bearer token verification
    pub jwt: Arc<JwtHandler>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(
        config: Config,
        monitoring: Arc<MonitoringSystem>,
        storage: Arc<dyn Storage>,
    ) -> Result<Self> {
        let jwt = JwtHandler::new(config.auth())?;
        Ok(Self {
            config: Arc::new(config),
            monitoring,
            storage,
            jwt: Arc::new(jwt),
        })
    }

    /// Build every component from configuration
    pub fn from_config(config: Config) -> Result<Self> {
        let storage = storage::from_config(config.storage())?;
        let monitoring = Arc::new(MonitoringSystem::new(config.monitoring())?);
        Self::new(config, monitoring, storage)
    }
}
