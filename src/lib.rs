//! Semantic Cache - reuse answers for semantically similar queries
//!
//! Embeds incoming queries with an external model, matches them against a
//! FIFO-bounded store of answered queries by cosine similarity, and persists
//! the store as JSON.

pub mod api;
pub mod cache;
pub mod config;
pub mod embedding;
pub mod error;
pub mod models;
pub mod service;

pub use api::AppState;
pub use config::Config;
pub use error::{CacheError, Result};
pub use service::CacheService;
