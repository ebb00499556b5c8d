//! Storage backend implementations.
//!
//! This module provides concrete implementations of
//! [`catalog_core::storage::ItemRepository`]. The backend is chosen at start-up
//! from [`Config::storage`](crate::config::Config).
//!
//! # Feature Flags
//!
//! - `dynamodb` (default): AWS DynamoDB backend using `aws-sdk-dynamodb`
//!
//! The in-memory backend is always compiled; it backs the tests and the
//! local server when no AWS account is at hand.

use std::sync::Arc;

use catalog_core::storage::ItemRepository;

use crate::config::{Config, StorageBackend};

#[cfg(feature = "dynamodb")]
pub mod dynamodb;
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbRepository;
pub use inmemory::InMemoryRepository;

/// Builds the repository selected by `config`.
///
/// The DynamoDB client is created once here and shared by every invocation.
pub async fn create_repository(config: &Config) -> anyhow::Result<Arc<dyn ItemRepository>> {
    match config.storage {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage");
            Ok(Arc::new(InMemoryRepository::new()))
        }
        #[cfg(feature = "dynamodb")]
        StorageBackend::DynamoDb => {
            tracing::info!(
                table = %config.table_name,
                region = %config.region,
                endpoint = config.endpoint_url.as_deref().unwrap_or("default"),
                "Using DynamoDB storage"
            );
            Ok(Arc::new(DynamoDbRepository::from_config(config).await))
        }
        #[cfg(not(feature = "dynamodb"))]
        StorageBackend::DynamoDb => {
            anyhow::bail!("DynamoDB storage requires the `dynamodb` feature")
        }
    }
}
