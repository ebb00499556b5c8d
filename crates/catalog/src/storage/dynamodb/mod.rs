//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of the repository
//! trait using `aws-sdk-dynamodb`. Items are stored whole in one table whose
//! partition key is `id`.

mod conversions;
mod error;
mod repository;

pub use conversions::{attribute_to_json, attributes_to_item, item_to_attributes, json_to_attribute};
pub use repository::DynamoDbRepository;
