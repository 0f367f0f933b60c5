//! Configuration data models
//!
//! This module defines all configuration structures used by the service.

#![allow(missing_docs)]

pub mod auth;
pub mod logging;
pub mod monitoring;
pub mod server;
pub mod storage;

pub use auth::*;
pub use logging::*;
pub use monitoring::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

pub fn default_true() -> bool {
    true
}

pub fn default_algorithm() -> String {
    "HS256".to_string()
}

pub fn default_access_token_expire_minutes() -> u64 {
    30
}

pub fn default_database_url() -> String {
    "memory://".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_request_history() -> usize {
    10_000
}

pub fn default_snapshot_history() -> usize {
    1_000
}

pub fn default_collection_interval() -> u64 {
    60
}

pub fn default_alert_cooldown() -> u64 {
    300
}

pub fn default_slow_operation_threshold() -> f64 {
    1.0
}

pub fn default_operation_history() -> usize {
    1_000
}

pub fn default_shutdown_timeout() -> u64 {
    30
}
