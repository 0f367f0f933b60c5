//! Persistence collaborator
//!
//! Connectivity probe, account lookup and ownership-scoped kitchen queries.
//! Every kitchen query takes the caller's user id and never returns rows
//! owned by someone else. `MemoryStorage` is the in-process implementation.

mod memory;

pub use memory::MemoryStorage;

use crate::config::StorageConfig;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Account record as seen by authentication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default = "crate::config::default_true")]
    pub is_active: bool,
    /// Argon2 PHC string; accounts without one cannot log in
    #[serde(default, skip_serializing)]
    pub password_hash: Option<String>,
}

impl User {
    /// Create an active user
    pub fn new(id: i64, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            is_active: true,
            password_hash: None,
        }
    }

    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }
}

/// A kitchen and the user who owns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kitchen {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Kitchen {
    pub fn new(id: i64, owner_id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            owner_id,
            name: name.into(),
            description: None,
            created_at: Utc::now(),
        }
    }
}

/// Filter and window applied after ownership scoping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitchenQuery {
    pub skip: usize,
    pub limit: usize,
    /// Case-insensitive substring of the kitchen name
    pub name: Option<String>,
}

impl Default for KitchenQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 100,
            name: None,
        }
    }
}

impl KitchenQuery {
    pub fn matches(&self, kitchen: &Kitchen) -> bool {
        match &self.name {
            Some(name) => kitchen
                .name
                .to_lowercase()
                .contains(&name.trim().to_lowercase()),
            None => true,
        }
    }
}

/// One window of a larger result set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<T> {
    /// Slice `all` (already filtered and ordered) by `skip`/`limit`
    pub fn paginate(all: Vec<T>, skip: usize, limit: usize) -> Self {
        let limit = limit.max(1);
        let total = all.len();
        let items = all.into_iter().skip(skip).take(limit).collect();
        Self {
            items,
            total,
            page: skip / limit + 1,
            per_page: limit,
            pages: if total == 0 { 1 } else { total.div_ceil(limit) },
            has_next: skip + limit < total,
            has_prev: skip > 0,
        }
    }
}

/// Persistence primitives consumed by the HTTP layer
#[async_trait]
pub trait Storage: Send + Sync + std::fmt::Debug {
    /// Round-trip a trivial query to prove connectivity
    async fn ping(&self) -> Result<()>;

    /// Look a user up by unique username
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Ids of every kitchen owned by `owner_id`, ascending
    async fn owned_kitchen_ids(&self, owner_id: i64) -> Result<Vec<i64>>;

    /// Kitchens owned by `owner_id` matching `query`, newest first
    async fn list_kitchens(&self, owner_id: i64, query: &KitchenQuery) -> Result<Page<Kitchen>>;

    /// The kitchen, only when `owner_id` owns it
    async fn find_owned_kitchen(&self, owner_id: i64, kitchen_id: i64) -> Result<Option<Kitchen>>;
}

/// Build the storage backend named by the configured URL
pub fn from_config(config: &StorageConfig) -> Result<Arc<dyn Storage>> {
    if config.database_url.starts_with("memory://") {
        let storage = MemoryStorage::new();
        for user in &config.users {
            storage.insert_user(user.clone());
        }
        for kitchen in &config.kitchens {
            storage.insert_kitchen(kitchen.clone());
        }
        info!(
            "Using in-memory storage with {} seeded user(s) and {} kitchen(s)",
            config.users.len(),
            config.kitchens.len()
        );
        return Ok(Arc::new(storage));
    }

    Err(GatewayError::config(format!(
        "Unsupported database URL: {}",
        config.database_url
    )))
}
