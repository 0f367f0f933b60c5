//! Listener settings

use super::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Where and how the HTTP listener runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Worker threads; one per CPU when unset
    pub workers: Option<usize>,
    /// Seconds a client has to send its request head
    #[serde(default = "default_timeout", alias = "timeout")]
    pub request_timeout: u64,
    /// Seconds in-flight requests get to finish on shutdown
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout: u64,
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            request_timeout: default_timeout(),
            shutdown_timeout: default_shutdown_timeout(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Overlay the non-default fields of `other`
    pub fn merge(self, other: Self) -> Self {
        let defaults = Self::default();
        Self {
            host: pick(other.host, self.host, &defaults.host),
            port: pick(other.port, self.port, &defaults.port),
            workers: other.workers.or(self.workers),
            request_timeout: pick(
                other.request_timeout,
                self.request_timeout,
                &defaults.request_timeout,
            ),
            shutdown_timeout: pick(
                other.shutdown_timeout,
                self.shutdown_timeout,
                &defaults.shutdown_timeout,
            ),
            cors: self.cors.merge(other.cors),
        }
    }

    /// `host:port` for binding
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("Port cannot be 0".to_string());
        }
        if self.request_timeout == 0 {
            return Err("Request timeout cannot be 0".to_string());
        }
        if self.workers == Some(0) {
            return Err("Worker count cannot be 0".to_string());
        }
        self.cors.validate()
    }
}

/// Take `incoming` unless it still holds the default
fn pick<T: PartialEq>(incoming: T, current: T, default: &T) -> T {
    if &incoming != default { incoming } else { current }
}

/// Cross-origin access for the dashboard frontend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Frontend origins; `"*"` admits any origin, empty admits none
    #[serde(default)]
    pub origins: Vec<String>,
    /// Let browsers send cookies and auth headers cross-origin
    #[serde(default)]
    pub allow_credentials: bool,
}

impl CorsConfig {
    pub fn merge(mut self, other: Self) -> Self {
        if !other.origins.is_empty() {
            self.origins = other.origins;
        }
        self.allow_credentials |= other.allow_credentials;
        self
    }

    pub fn allows_all_origins(&self) -> bool {
        self.origins.iter().any(|o| o == "*")
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.allows_all_origins() && self.allow_credentials {
            return Err("CORS credentials cannot be combined with a \"*\" origin".to_string());
        }
        if self.allows_all_origins() {
            warn!("CORS admits any origin; list the dashboard origins instead");
        }
        Ok(())
    }
}
