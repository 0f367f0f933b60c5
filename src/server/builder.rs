//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use tracing::info;

/// Server builder for easier configuration
#[derive(Debug, Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    state: Option<AppState>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use pre-built state instead of building it from configuration
    pub fn with_state(mut self, state: AppState) -> Self {
        self.state = Some(state);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        if let Some(state) = self.state {
            return Ok(HttpServer::with_state(state));
        }

        let config = self
            .config
            .ok_or_else(|| GatewayError::config("Configuration is required"))?;
        HttpServer::new(&config)
    }
}

/// Build the server from `config` and run it until shutdown
pub async fn run_server(config: Config) -> Result<()> {
    let build = crate::build_info();
    info!(
        "kitchen-monitor v{} (rev {}, built {})",
        build.version, build.git_hash, build.build_time
    );

    let server = ServerBuilder::new().with_config(config).build()?;

    info!(
        "Server starting at: http://{}",
        server.config().address()
    );
    info!("API Endpoints:");
    info!("   GET  /health, /health/detailed, /health/ready, /health/live");
    info!("   GET  /metrics, /metrics/system, /metrics/performance");
    info!("   GET  /metrics/endpoints, /metrics/errors, /metrics/users");
    info!("   POST /auth/token");
    info!("   GET  /dashboard/*, /kitchens, /kitchens/{{id}} (bearer token required)");

    server.start().await
}
