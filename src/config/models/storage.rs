//! Storage configuration

use super::*;
use crate::auth::password::is_password_hash;
use crate::storage::{Kitchen, User};
use std::collections::HashSet;
use serde::{Deserialize, Serialize};

/// Persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Database URL; `memory://` selects the in-process store
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Accounts loaded into the in-memory backend at startup
    #[serde(default)]
    pub users: Vec<User>,
    /// Kitchens loaded into the in-memory backend; owners must be seeded users
    #[serde(default)]
    pub kitchens: Vec<Kitchen>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            users: Vec::new(),
            kitchens: Vec::new(),
        }
    }
}

impl StorageConfig {
    /// Merge storage configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.database_url != default_database_url() {
            self.database_url = other.database_url;
        }
        if !other.users.is_empty() {
            self.users = other.users;
        }
        if !other.kitchens.is_empty() {
            self.kitchens = other.kitchens;
        }
        self
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.database_url.is_empty() {
            return Err("Database URL is required".to_string());
        }
        let mut names = HashSet::new();
        let mut user_ids = HashSet::new();
        for user in &self.users {
            if user.username.is_empty() {
                return Err("Seeded users need a username".to_string());
            }
            if !names.insert(&user.username) {
                return Err(format!("Duplicate seeded user: {}", user.username));
            }
            user_ids.insert(user.id);
            if let Some(hash) = &user.password_hash {
                if !is_password_hash(hash) {
                    return Err(format!(
                        "Seeded user {} has a malformed password_hash",
                        user.username
                    ));
                }
            }
        }

        let mut kitchen_ids = HashSet::new();
        for kitchen in &self.kitchens {
            if !kitchen_ids.insert(kitchen.id) {
                return Err(format!("Duplicate seeded kitchen id: {}", kitchen.id));
            }
            if !user_ids.contains(&kitchen.owner_id) {
                return Err(format!(
                    "Kitchen {} is owned by unknown user id {}",
                    kitchen.id, kitchen.owner_id
                ));
            }
        }
        Ok(())
    }
}
