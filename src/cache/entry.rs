//! Cache Entry Module
//!
//! Defines the immutable record pairing a query with its answer and embedding.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::cache::EmbeddingVector;

// == Cache Entry ==
/// A previously answered query.
///
/// Fields are private and never mutated once constructed; an entry leaves
/// the store only through eviction or a full reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The query text the answer was produced for
    #[serde(alias = "prompt")]
    query: String,
    /// The answer text
    answer: String,
    /// Embedding of `query`
    embedding: EmbeddingVector,
    /// Creation timestamp (Unix milliseconds)
    #[serde(rename = "createdAt", alias = "timestamp")]
    created_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(
        query: impl Into<String>,
        answer: impl Into<String>,
        embedding: EmbeddingVector,
    ) -> Self {
        Self::with_timestamp(query, answer, embedding, current_timestamp_ms())
    }

    /// Creates an entry with an explicit creation timestamp.
    pub fn with_timestamp(
        query: impl Into<String>,
        answer: impl Into<String>,
        embedding: EmbeddingVector,
        created_at: u64,
    ) -> Self {
        Self {
            query: query.into(),
            answer: answer.into(),
            embedding,
            created_at,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn embedding(&self) -> &EmbeddingVector {
        &self.embedding
    }

    /// Creation timestamp in Unix milliseconds.
    pub fn created_at(&self) -> u64 {
        self.created_at
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
///
/// A clock set before the epoch yields 0.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
