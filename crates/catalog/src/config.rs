use std::env;

use catalog_core::event::{EmptyReads, ResponseOptions};
use thiserror::Error;

/// Region used when `AWS_REGION` is not set.
pub const DEFAULT_REGION: &str = "us-west-2";

/// Table name used by the in-memory backend when none is configured.
pub const DEFAULT_MEMORY_TABLE: &str = "products";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Which repository implementation backs the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    DynamoDb,
    Memory,
}

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Parses `text` or `json`, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Reads `LOG_FORMAT` on its own, falling back to text when it is unset
    /// or invalid.
    ///
    /// Tracing is initialized from this before the full configuration loads,
    /// so configuration errors are logged in the requested format.
    pub fn from_env() -> Self {
        env::var("LOG_FORMAT")
            .ok()
            .and_then(|value| Self::parse(&value))
            .unwrap_or_default()
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// DynamoDB table holding the products
    pub table_name: String,
    /// AWS region for the DynamoDB client (default: "us-west-2")
    pub region: String,
    /// Endpoint override, e.g. DynamoDB Local
    pub endpoint_url: Option<String>,
    /// Repository backend (default: DynamoDB)
    pub storage: StorageBackend,
    /// Rendering of reads that found nothing (default: legacy)
    pub empty_reads: EmptyReads,
    /// Whether failure envelopes carry error detail (default: true)
    pub expose_error_detail: bool,
    /// Tracing output format (default: text)
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DYNAMODB_TABLE_NAME` - Table name (required for the DynamoDB backend)
    /// - `AWS_REGION` - Region (default: "us-west-2")
    /// - `DYNAMODB_ENDPOINT_URL` - Endpoint override (default: unset)
    /// - `CATALOG_STORAGE` - `dynamodb` or `memory` (default: "dynamodb")
    /// - `CATALOG_EMPTY_READS` - `legacy` or `normalized` (default: "legacy")
    /// - `CATALOG_EXPOSE_ERRORS` - Boolean (default: true)
    /// - `LOG_FORMAT` - `text` or `json` (default: "text")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage = match lookup("CATALOG_STORAGE") {
            None => StorageBackend::DynamoDb,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "dynamodb" => StorageBackend::DynamoDb,
                "memory" => StorageBackend::Memory,
                _ => return Err(invalid("CATALOG_STORAGE", value)),
            },
        };

        let table_name = match (lookup("DYNAMODB_TABLE_NAME"), storage) {
            (Some(name), _) if !name.trim().is_empty() => name,
            (_, StorageBackend::Memory) => DEFAULT_MEMORY_TABLE.to_string(),
            (_, StorageBackend::DynamoDb) => {
                return Err(ConfigError::Missing("DYNAMODB_TABLE_NAME"))
            }
        };

        let empty_reads = match lookup("CATALOG_EMPTY_READS") {
            None => EmptyReads::default(),
            Some(value) => {
                EmptyReads::parse(&value).ok_or_else(|| invalid("CATALOG_EMPTY_READS", value))?
            }
        };

        let expose_error_detail = match lookup("CATALOG_EXPOSE_ERRORS") {
            None => true,
            Some(value) => parse_bool(&value).ok_or_else(|| invalid("CATALOG_EXPOSE_ERRORS", value))?,
        };

        let log_format = match lookup("LOG_FORMAT") {
            None => LogFormat::default(),
            Some(value) => LogFormat::parse(&value).ok_or_else(|| invalid("LOG_FORMAT", value))?,
        };

        Ok(Self {
            table_name,
            region: lookup("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            endpoint_url: lookup("DYNAMODB_ENDPOINT_URL").filter(|url| !url.trim().is_empty()),
            storage,
            empty_reads,
            expose_error_detail,
            log_format,
        })
    }

    /// Response rendering switches derived from this configuration.
    pub fn response_options(&self) -> ResponseOptions {
        ResponseOptions {
            empty_reads: self.empty_reads,
            expose_error_detail: self.expose_error_detail,
        }
    }
}

fn invalid(var: &'static str, value: String) -> ConfigError {
    ConfigError::Invalid { var, value }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
