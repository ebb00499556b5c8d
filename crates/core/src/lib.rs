//! Functional core for the catalog handler.
//!
//! Everything in this crate is pure: routing decisions, update-expression
//! construction, envelope rendering and the storage contract. The AWS SDK,
//! the Lambda runtime and the HTTP server live in the `catalog` crate.

pub mod event;
pub mod item;
pub mod storage;
pub mod update;
