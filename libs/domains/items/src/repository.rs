use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ItemResult;
use crate::models::Item;

/// Read access to the relational item table
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All items, ordered by id
    async fn list_all(&self) -> ItemResult<Vec<Item>>;

    /// Get an item by ID
    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>>;
}

/// In-memory implementation of ItemRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryItemRepository {
    items: Arc<RwLock<BTreeMap<i64, Item>>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with `items`, later duplicates win
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            items: Arc::new(RwLock::new(
                items.into_iter().map(|item| (item.id, item)).collect(),
            )),
        }
    }

    /// Insert or replace an item
    pub async fn insert(&self, item: Item) {
        self.items.write().await.insert(item.id, item);
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn list_all(&self) -> ItemResult<Vec<Item>> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        Ok(self.items.read().await.get(&id).cloned())
    }
}
