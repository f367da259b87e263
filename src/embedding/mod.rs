//! Embedding Module
//!
//! The vector-producer capability consumed by the cache service and its
//! HTTP-backed implementation.

mod http;
mod provider;

pub use http::HttpEmbeddingProvider;
pub use provider::EmbeddingProvider;

#[cfg(test)]
pub use provider::mock::MockEmbeddingProvider;
