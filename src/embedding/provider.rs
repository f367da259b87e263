//! Embedding provider capability

use std::fmt::Debug;

use async_trait::async_trait;

use crate::cache::EmbeddingVector;
use crate::error::Result;

/// Produces embeddings for text.
///
/// Implementations report failure as `CacheError::EmbeddingUnavailable`;
/// they must never substitute a zero vector for a failed call.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<EmbeddingVector>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
