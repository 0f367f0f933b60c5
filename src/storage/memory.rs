//! In-process storage backend

use super::{Kitchen, KitchenQuery, Page, Storage, User};
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Users keyed by username and kitchens keyed by id, with a switch to
/// simulate an outage
#[derive(Debug)]
pub struct MemoryStorage {
    users: DashMap<String, User>,
    kitchens: DashMap<i64, Kitchen>,
    available: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            kitchens: DashMap::new(),
            available: AtomicBool::new(true),
        }
    }

    /// Insert or replace a user
    pub fn insert_user(&self, user: User) {
        self.users.insert(user.username.clone(), user);
    }

    /// Insert or replace a kitchen
    pub fn insert_kitchen(&self, kitchen: Kitchen) {
        self.kitchens.insert(kitchen.id, kitchen);
    }

    fn owned_by(&self, owner_id: i64) -> Vec<Kitchen> {
        self.kitchens
            .iter()
            .filter(|entry| entry.owner_id == owner_id)
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Mark the backend reachable or unreachable
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Release);
    }

    fn check_available(&self) -> Result<()> {
        if self.available.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(GatewayError::database("storage backend is unavailable"))
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn ping(&self) -> Result<()> {
        self.check_available()
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.check_available()?;
        Ok(self.users.get(username).map(|entry| entry.value().clone()))
    }

    async fn owned_kitchen_ids(&self, owner_id: i64) -> Result<Vec<i64>> {
        self.check_available()?;
        let mut ids: Vec<i64> = self.owned_by(owner_id).iter().map(|k| k.id).collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn list_kitchens(&self, owner_id: i64, query: &KitchenQuery) -> Result<Page<Kitchen>> {
        self.check_available()?;
        let mut kitchens: Vec<Kitchen> = self
            .owned_by(owner_id)
            .into_iter()
            .filter(|k| query.matches(k))
            .collect();
        kitchens.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(Page::paginate(kitchens, query.skip, query.limit))
    }

    async fn find_owned_kitchen(&self, owner_id: i64, kitchen_id: i64) -> Result<Option<Kitchen>> {
        self.check_available()?;
        Ok(self
            .kitchens
            .get(&kitchen_id)
            .filter(|entry| entry.owner_id == owner_id)
            .map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_and_outage() {
        let storage = MemoryStorage::new();
        storage.insert_user(User::new(1, "alice", "alice@example.com"));

        assert!(storage.find_user_by_username("alice").await.unwrap().is_some());
        assert!(storage.find_user_by_username("bob").await.unwrap().is_none());

        storage.set_available(false);
        assert!(storage.ping().await.is_err());
        assert!(storage.find_user_by_username("alice").await.is_err());

        storage.set_available(true);
        assert!(storage.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_kitchen_queries_are_owner_scoped() {
        let storage = MemoryStorage::new();
        storage.insert_kitchen(Kitchen::new(1, 10, "Main Kitchen"));
        storage.insert_kitchen(Kitchen::new(2, 10, "Pastry Lab"));
        storage.insert_kitchen(Kitchen::new(3, 20, "Other Kitchen"));

        assert_eq!(storage.owned_kitchen_ids(10).await.unwrap(), vec![1, 2]);
        assert!(storage.owned_kitchen_ids(30).await.unwrap().is_empty());

        assert!(storage.find_owned_kitchen(10, 2).await.unwrap().is_some());
        assert!(storage.find_owned_kitchen(10, 3).await.unwrap().is_none());

        let query = KitchenQuery {
            name: Some("kitchen".to_string()),
            ..KitchenQuery::default()
        };
        let page = storage.list_kitchens(10, &query).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, 1);

        storage.set_available(false);
        assert!(storage.list_kitchens(10, &KitchenQuery::default()).await.is_err());
    }
}
