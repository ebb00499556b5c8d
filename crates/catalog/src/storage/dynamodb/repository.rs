//! DynamoDB repository implementation.
//!
//! Implements the repository trait from `catalog_core::storage` using DynamoDB.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::operation::RequestId;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use catalog_core::item::{Item, CATEGORY_ATTRIBUTE, ID_ATTRIBUTE};
use catalog_core::storage::{ItemRepository, RepositoryError, Result, StoreAck};
use catalog_core::update::UpdateExpression;

use crate::config::Config;

use super::conversions::{attributes_to_item, item_to_attributes, json_to_attribute};
use super::error::map_sdk_error;

const QUERY_KEY_CONDITION: &str = "#id = :id";
const QUERY_CATEGORY_FILTER: &str = "contains(#category, :category)";

/// DynamoDB-based repository implementation.
///
/// Holds one SDK client for the life of the process.
#[derive(Debug, Clone)]
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new repository from application configuration.
    ///
    /// Uses the AWS SDK default credential chain with the configured region
    /// and optional endpoint override.
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        Self::new(Client::new(&sdk_config), config.table_name.clone())
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

fn key_value(id: &str) -> AttributeValue {
    AttributeValue::S(id.to_string())
}

fn ack(id: impl Into<String>, output: &impl RequestId) -> StoreAck {
    StoreAck {
        id: id.into(),
        request_id: output.request_id().map(str::to_string),
    }
}

fn items_from_page(items: Option<Vec<HashMap<String, AttributeValue>>>) -> Result<Vec<Item>> {
    items
        .unwrap_or_default()
        .iter()
        .map(attributes_to_item)
        .collect()
}

#[async_trait]
impl ItemRepository for DynamoDbRepository {
    async fn get_item(&self, id: &str) -> Result<Option<Item>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(ID_ATTRIBUTE, key_value(id))
            .send()
            .await
            .map_err(|e| map_sdk_error("GetItem", e))?;

        match result.item {
            Some(item) => Ok(Some(attributes_to_item(&item)?)),
            None => Ok(None),
        }
    }

    async fn scan_items(&self) -> Result<Vec<Item>> {
        // Only the first page is read; LastEvaluatedKey is ignored.
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| map_sdk_error("Scan", e))?;

        if result.last_evaluated_key.is_some() {
            tracing::debug!(table = %self.table_name, "Scan returned a partial page");
        }

        items_from_page(result.items)
    }

    async fn query_by_category(&self, id: &str, category: &str) -> Result<Vec<Item>> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression(QUERY_KEY_CONDITION)
            .filter_expression(QUERY_CATEGORY_FILTER)
            .expression_attribute_names("#id", ID_ATTRIBUTE)
            .expression_attribute_names("#category", CATEGORY_ATTRIBUTE)
            .expression_attribute_values(":id", key_value(id))
            .expression_attribute_values(":category", AttributeValue::S(category.to_string()))
            .send()
            .await
            .map_err(|e| map_sdk_error("Query", e))?;

        items_from_page(result.items)
    }

    async fn put_item(&self, item: &Item) -> Result<StoreAck> {
        let id = item.id().ok_or_else(|| {
            RepositoryError::InvalidData(format!("Item is missing '{}'", ID_ATTRIBUTE))
        })?;

        let output = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item_to_attributes(item)))
            .send()
            .await
            .map_err(|e| map_sdk_error("PutItem", e))?;

        Ok(ack(id, &output))
    }

    async fn delete_item(&self, id: &str) -> Result<StoreAck> {
        let output = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(ID_ATTRIBUTE, key_value(id))
            .send()
            .await
            .map_err(|e| map_sdk_error("DeleteItem", e))?;

        Ok(ack(id, &output))
    }

    async fn update_item(&self, id: &str, update: &UpdateExpression) -> Result<StoreAck> {
        let names: HashMap<String, String> = update.names().into_iter().collect();
        let values: HashMap<String, AttributeValue> = update
            .values()
            .into_iter()
            .map(|(placeholder, value)| (placeholder, json_to_attribute(&value)))
            .collect();

        let output = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(ID_ATTRIBUTE, key_value(id))
            .update_expression(update.expression())
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(values))
            .send()
            .await
            .map_err(|e| map_sdk_error("UpdateItem", e))?;

        Ok(ack(id, &output))
    }
}
