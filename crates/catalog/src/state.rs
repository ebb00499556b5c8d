//! Shared state handed to every invocation.

use std::sync::Arc;

use catalog_core::event::ResponseOptions;
use catalog_core::storage::ItemRepository;

use crate::config::Config;
use crate::storage::{create_repository, InMemoryRepository};

/// Shared application state.
///
/// Cloned per invocation; the repository is built once at cold start.
#[derive(Clone)]
pub struct AppState {
    /// Product repository.
    pub repo: Arc<dyn ItemRepository>,
    /// How success and failure envelopes are rendered.
    pub options: ResponseOptions,
}

impl AppState {
    /// Creates state from an existing repository.
    pub fn new(repo: Arc<dyn ItemRepository>, options: ResponseOptions) -> Self {
        Self { repo, options }
    }

    /// Builds the repository selected by `config` and wraps it.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let repo = create_repository(config).await?;
        Ok(Self::new(repo, config.response_options()))
    }
}

impl Default for AppState {
    /// In-memory storage with default rendering.
    fn default() -> Self {
        Self::new(
            Arc::new(InMemoryRepository::new()),
            ResponseOptions::default(),
        )
    }
}
