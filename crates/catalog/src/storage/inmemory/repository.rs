//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use catalog_core::item::{Item, CATEGORY_ATTRIBUTE, ID_ATTRIBUTE};
use catalog_core::storage::{ItemRepository, RepositoryError, Result, StoreAck};
use catalog_core::update::UpdateExpression;

/// In-memory storage backend.
///
/// Items are kept in key order, so scans are deterministic. Data is not
/// persisted and is lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    items: Arc<RwLock<BTreeMap<String, Item>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored items.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl ItemRepository for InMemoryRepository {
    async fn get_item(&self, id: &str) -> Result<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.get(id).cloned())
    }

    async fn scan_items(&self) -> Result<Vec<Item>> {
        let items = self.items.read().await;
        Ok(items.values().cloned().collect())
    }

    async fn query_by_category(&self, id: &str, category: &str) -> Result<Vec<Item>> {
        let items = self.items.read().await;
        Ok(items
            .get(id)
            .filter(|item| item.attribute_contains(CATEGORY_ATTRIBUTE, category))
            .cloned()
            .into_iter()
            .collect())
    }

    async fn put_item(&self, item: &Item) -> Result<StoreAck> {
        let id = item
            .id()
            .ok_or_else(|| RepositoryError::InvalidData(format!("Item is missing '{ID_ATTRIBUTE}'")))?
            .to_string();

        let mut items = self.items.write().await;
        items.insert(id.clone(), item.clone());
        Ok(StoreAck::new(id))
    }

    async fn delete_item(&self, id: &str) -> Result<StoreAck> {
        let mut items = self.items.write().await;
        items.remove(id);
        Ok(StoreAck::new(id))
    }

    async fn update_item(&self, id: &str, update: &UpdateExpression) -> Result<StoreAck> {
        let mut items = self.items.write().await;
        let item = items.entry(id.to_string()).or_insert_with(|| {
            let mut item = Item::new();
            item.insert(ID_ATTRIBUTE, Value::String(id.to_string()));
            item
        });

        for (name, value) in update.assignments() {
            item.insert(name, value.clone());
        }

        Ok(StoreAck::new(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> Item {
        Item::try_from(value).unwrap()
    }

    async fn seeded() -> InMemoryRepository {
        let repo = InMemoryRepository::new();
        repo.put_item(&item(json!({"id": "b", "name": "Bolt", "category": "hardware"})))
            .await
            .unwrap();
        repo.put_item(&item(json!({"id": "a", "name": "Anvil", "category": "tools"})))
            .await
            .unwrap();
        repo
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let repo = seeded().await;

        let found = repo.get_item("a").await.unwrap().unwrap();
        assert_eq!(found.get("name"), Some(&json!("Anvil")));
        assert!(repo.get_item("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_requires_id() {
        let repo = InMemoryRepository::new();
        let result = repo.put_item(&item(json!({"name": "Nameless"}))).await;

        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_put_replaces_whole_item() {
        let repo = seeded().await;
        repo.put_item(&item(json!({"id": "a", "price": 5})))
            .await
            .unwrap();

        let found = repo.get_item("a").await.unwrap().unwrap();
        assert_eq!(found.get("name"), None);
        assert_eq!(found.get("price"), Some(&json!(5)));
    }

    #[tokio::test]
    async fn test_scan_returns_all_in_key_order() {
        let repo = seeded().await;

        let items = repo.scan_items().await.unwrap();
        let ids: Vec<_> = items.iter().filter_map(Item::id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_scan_empty() {
        let repo = InMemoryRepository::new();
        assert!(repo.scan_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_by_category() {
        let repo = seeded().await;

        assert_eq!(repo.query_by_category("a", "tools").await.unwrap().len(), 1);
        assert_eq!(repo.query_by_category("a", "too").await.unwrap().len(), 1);
        assert!(repo.query_by_category("a", "hardware").await.unwrap().is_empty());
        assert!(repo.query_by_category("zzz", "tools").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_unconditional() {
        let repo = seeded().await;

        let first = repo.delete_item("a").await.unwrap();
        let second = repo.delete_item("a").await.unwrap();

        assert_eq!(first, second);
        assert!(repo.get_item("a").await.unwrap().is_none());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_overwrites_named_attributes() {
        let repo = seeded().await;
        let update = UpdateExpression::from_changes(&item(json!({"category": "c2"}))).unwrap();

        let ack = repo.update_item("a", &update).await.unwrap();

        assert_eq!(ack.id, "a");
        let found = repo.get_item("a").await.unwrap().unwrap();
        assert_eq!(found.get("category"), Some(&json!("c2")));
        assert_eq!(found.get("name"), Some(&json!("Anvil")));
    }

    #[tokio::test]
    async fn test_update_missing_item_creates_it() {
        let repo = InMemoryRepository::new();
        let update = UpdateExpression::from_changes(&item(json!({"name": "New"}))).unwrap();

        repo.update_item("fresh", &update).await.unwrap();

        let found = repo.get_item("fresh").await.unwrap().unwrap();
        assert_eq!(found.id(), Some("fresh"));
        assert_eq!(found.get("name"), Some(&json!("New")));
    }
}
