//! Configuration management
//!
//! Configuration comes from a YAML file, from environment variables (with
//! `.env` support), or from both merged together.

pub mod models;

pub use models::*;

use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from the process environment, reading `.env` first
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment overrides from {:?}", path);
        }

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let secret = lookup("SECRET_KEY");
        warn_ephemeral_secret(secret.is_some());
        if let Some(secret) = secret {
            config.auth.secret_key = secret;
        }
        if let Some(algorithm) = lookup("ALGORITHM") {
            config.auth.algorithm = algorithm;
        }
        if let Some(minutes) = lookup("ACCESS_TOKEN_EXPIRE_MINUTES") {
            config.auth.access_token_expire_minutes = parse_var("ACCESS_TOKEN_EXPIRE_MINUTES", &minutes)?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            config.storage.database_url = url;
        }
        if let Some(host) = lookup("HOST") {
            config.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.server.port = parse_var("PORT", &port)?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(json) = lookup("LOG_JSON") {
            config.logging.json = matches!(json.to_lowercase().as_str(), "true" | "1" | "yes");
        }

        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Get auth configuration
    pub fn auth(&self) -> &AuthConfig {
        &self.auth
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    /// Get monitoring configuration
    pub fn monitoring(&self) -> &MonitoringConfig {
        &self.monitoring
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| GatewayError::Config(format!("Server config error: {}", e)))?;

        self.auth
            .validate()
            .map_err(|e| GatewayError::Config(format!("Auth config error: {}", e)))?;

        self.storage
            .validate()
            .map_err(|e| GatewayError::Config(format!("Storage config error: {}", e)))?;

        self.monitoring
            .validate()
            .map_err(|e| GatewayError::Config(format!("Monitoring config error: {}", e)))?;

        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.auth = self.auth.merge(other.auth);
        self.storage = self.storage.merge(other.storage);
        self.monitoring = self.monitoring.merge(other.monitoring);
        self.logging = self.logging.merge(other.logging);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| GatewayError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| GatewayError::Config(format!("Invalid value for {}: {}", key, value)))
}
