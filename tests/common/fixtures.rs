//! Test fixtures and data factories
//!
//! All factories create real objects, not mocks. Resource readings come from
//! a `StaticSampler` so tests never depend on the host's load.

use chrono::{DateTime, Utc};
use kitchen_monitor::config::{Config, MonitoringConfig};
use kitchen_monitor::monitoring::{MonitoringSystem, RequestRecord, StaticSampler};
use kitchen_monitor::server::AppState;
use kitchen_monitor::storage::{MemoryStorage, Storage, User};
use std::sync::Arc;
use std::time::Duration;

/// Factory for request records
pub struct RecordFactory;

impl RecordFactory {
    /// Successful GET taking `millis`
    pub fn ok(path: &str, millis: u64) -> RequestRecord {
        RequestRecord::new("GET", path, 200, Duration::from_millis(millis))
    }

    /// Failed request carrying an error code
    pub fn failed(path: &str, status: u16, code: &str) -> RequestRecord {
        RequestRecord::new("GET", path, status, Duration::from_millis(10))
            .with_error_code(Some(code.to_string()))
    }

    /// Successful request stamped at `at`
    pub fn ok_at(path: &str, millis: u64, at: DateTime<Utc>) -> RequestRecord {
        Self::ok(path, millis).at(at)
    }
}

/// Monitoring system whose sampler reports the given load
pub fn monitoring_with_load(
    config: &MonitoringConfig,
    cpu: f64,
    memory: f64,
    disk: f64,
) -> (Arc<MonitoringSystem>, Arc<StaticSampler>) {
    let sampler = Arc::new(StaticSampler::with_load(cpu, memory, disk));
    let monitoring = MonitoringSystem::with_sampler(config, sampler.clone())
        .expect("monitoring system should build");
    (Arc::new(monitoring), sampler)
}

/// Application state with one active user and a token for it
pub struct TestApp {
    pub state: AppState,
    pub storage: Arc<MemoryStorage>,
    pub sampler: Arc<StaticSampler>,
    pub token: String,
    pub user_id: i64,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let user_id = 7;
        let storage = Arc::new(MemoryStorage::new());
        storage.insert_user(User::new(user_id, "sous-chef", "sous@example.com"));

        let (monitoring, sampler) = monitoring_with_load(config.monitoring(), 25.0, 40.0, 50.0);
        let state = AppState::new(config, monitoring, storage.clone() as Arc<dyn Storage>)
            .expect("state should build");
        let token = state
            .jwt
            .create_access_token("sous-chef")
            .expect("token should sign");

        Self {
            state,
            storage,
            sampler,
            token,
            user_id,
        }
    }

    pub fn auth_header(&self) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.token))
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
