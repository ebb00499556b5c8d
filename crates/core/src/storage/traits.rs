use async_trait::async_trait;

use crate::item::Item;
use crate::update::UpdateExpression;

use super::{Result, StoreAck};

/// Single-table storage for product items keyed by `id`.
///
/// Each method is exactly one store call. None of them retries, paginates
/// or checks conditions.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Gets an item by its `id`.
    async fn get_item(&self, id: &str) -> Result<Option<Item>>;

    /// Returns the first page of a full-table scan.
    async fn scan_items(&self) -> Result<Vec<Item>>;

    /// Returns items with key `id` whose `category` contains `category`.
    async fn query_by_category(&self, id: &str, category: &str) -> Result<Vec<Item>>;

    /// Writes a whole item, replacing any item with the same `id`.
    async fn put_item(&self, item: &Item) -> Result<StoreAck>;

    /// Deletes an item; deleting a missing item succeeds.
    async fn delete_item(&self, id: &str) -> Result<StoreAck>;

    /// Applies an update expression, creating the item if it is missing.
    async fn update_item(&self, id: &str, update: &UpdateExpression) -> Result<StoreAck>;
}
