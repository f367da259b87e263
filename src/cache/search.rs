//! Similarity Search Module
//!
//! Linear nearest-neighbor scan over the cache store.

use serde::Serialize;

use crate::cache::{CacheEntry, CacheStore, EmbeddingVector};
use crate::error::Result;

// == Search Match ==
/// The best entry for a query and its cosine similarity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchMatch {
    pub entry: CacheEntry,
    pub similarity: f32,
}

// == Find Best Match ==
/// Returns the most similar entry if its similarity is strictly above
/// `threshold`.
///
/// Scans every entry in insertion order. On equal scores the earliest entry
/// wins. An empty store is a miss, not an error. Any entry whose dimension
/// differs from the query's fails the search with `DimensionMismatch`.
pub fn find_best_match(
    query: &EmbeddingVector,
    store: &CacheStore,
    threshold: f32,
) -> Result<Option<SearchMatch>> {
    if store.is_empty() {
        return Ok(None);
    }

    let mut best: Option<(&CacheEntry, f32)> = None;

    for entry in store.all() {
        let similarity = query.similarity(entry.embedding())?;
        match best {
            Some((_, best_similarity)) if similarity <= best_similarity => {}
            _ => best = Some((entry, similarity)),
        }
    }

    Ok(best
        .filter(|(_, similarity)| *similarity > threshold)
        .map(|(entry, similarity)| SearchMatch {
            entry: entry.clone(),
            similarity,
        }))
}
