//! Product catalog handler.
//!
//! Serves create, read, update, delete and category queries over a single
//! DynamoDB table, either under the AWS Lambda runtime or as a local axum
//! server. Route selection, item handling and envelopes live in
//! `catalog_core`; this crate wires them to storage and the runtimes.

pub mod app;
pub mod config;
pub mod handlers;
pub mod lambda;
pub mod state;
pub mod storage;
pub mod telemetry;

pub use config::Config;
pub use state::AppState;
