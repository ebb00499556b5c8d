//! In-memory storage backend.
//!
//! This module provides an in-memory implementation of the repository trait
//! that stores all items in a `BTreeMap` wrapped in `Arc<RwLock<_>>`. It
//! mirrors DynamoDB's observable behavior for the calls the handler makes:
//! unconditional puts and deletes, upserting updates and `contains` filters.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog::storage::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
