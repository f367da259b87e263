//! Cache Service
//!
//! Orchestrates the embedding producer, the store, similarity search and
//! persistence behind the lookup/record contract.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{
    find_best_match, CacheEntry, CacheStats, CacheStorage, CacheStore, EmbeddingVector,
    SearchMatch,
};
use crate::config::Config;
use crate::embedding::EmbeddingProvider;
use crate::error::{CacheError, Result};

// == Cache Service ==
/// Shared handle to the semantic cache.
///
/// Cloning is cheap; clones share the same store. Embeddings are computed
/// before the store lock is taken, so a slow producer never blocks other
/// requests. Mutations hold the write lock through insert, eviction and the
/// persisted write.
#[derive(Debug, Clone)]
pub struct CacheService {
    store: Arc<RwLock<CacheStore>>,
    embedder: Arc<dyn EmbeddingProvider>,
    storage: Arc<dyn CacheStorage>,
    threshold: f32,
    dimension: usize,
    embed_timeout: Duration,
}

impl CacheService {
    // == Constructors ==
    /// Wraps an existing store.
    pub fn new(
        store: CacheStore,
        embedder: Arc<dyn EmbeddingProvider>,
        storage: Arc<dyn CacheStorage>,
        config: &Config,
    ) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            embedder,
            storage,
            threshold: config.similarity_threshold,
            dimension: config.embedding_dimension,
            embed_timeout: config.embed_timeout(),
        }
    }

    /// Loads the persisted record from `storage` and builds the service.
    ///
    /// A record that cannot be read or does not match the configured
    /// dimension is logged and the service starts empty.
    pub async fn from_config(
        config: &Config,
        embedder: Arc<dyn EmbeddingProvider>,
        storage: Arc<dyn CacheStorage>,
    ) -> Self {
        let store = storage
            .load()
            .await
            .and_then(|record| {
                CacheStore::load(record, config.max_capacity, config.embedding_dimension)
            })
            .unwrap_or_else(|e| {
                warn!("Could not restore persisted cache, starting empty: {}", e);
                CacheStore::new(config.max_capacity)
            });

        info!(
            "Cache restored with {} entries (capacity {})",
            store.size(),
            store.capacity()
        );
        Self::new(store, embedder, storage, config)
    }

    // == Lookup ==
    /// Finds the cached entry most similar to `query_text`.
    ///
    /// Returns `Ok(None)` for an empty store or when no entry clears the
    /// threshold. Fails with `EmbeddingUnavailable` if the query cannot be
    /// embedded; callers should treat that as a miss.
    pub async fn lookup(&self, query_text: &str) -> Result<Option<SearchMatch>> {
        let query = self.embed(query_text).await?;

        let mut store = self.store.write().await;
        let found = find_best_match(&query, &store, self.threshold)?;
        store.record_lookup(found.is_some());

        match &found {
            Some(m) => debug!("Cache hit with similarity {:.4}", m.similarity),
            None => debug!("Cache miss over {} entries", store.size()),
        }
        Ok(found)
    }

    // == Record ==
    /// Embeds `query_text` and caches it with `answer_text`.
    ///
    /// Callers are responsible for the minimum answer length; it is not
    /// checked here. If the persisted write fails the entry stays in memory
    /// and `PersistenceFailure` is returned.
    pub async fn record(&self, query_text: &str, answer_text: &str) -> Result<()> {
        let embedding = self.embed(query_text).await?;
        let entry = CacheEntry::new(query_text, answer_text, embedding);

        let mut store = self.store.write().await;
        let evicted = store.insert(entry);
        if evicted > 0 {
            debug!("Evicted {} oldest entries", evicted);
        }

        // Snapshot after eviction so the record never exceeds capacity
        let snapshot = store.snapshot();
        self.storage.save(&snapshot).await.inspect_err(|e| {
            warn!("Cached entry kept in memory but not persisted: {}", e);
        })?;

        info!("Cached answer ({} entries)", store.size());
        Ok(())
    }

    // == Reset ==
    /// Removes every entry and persists the empty record.
    pub async fn reset(&self) -> Result<usize> {
        let mut store = self.store.write().await;
        let removed = store.clear();
        self.storage.save(&store.snapshot()).await?;

        info!("Cache reset, removed {} entries", removed);
        Ok(removed)
    }

    // == Accessors ==
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    pub async fn size(&self) -> usize {
        self.store.read().await.size()
    }

    // == Embed ==
    /// Calls the producer with a timeout and rejects vectors unusable for
    /// similarity.
    async fn embed(&self, text: &str) -> Result<EmbeddingVector> {
        let vector = tokio::time::timeout(self.embed_timeout, self.embedder.embed(text))
            .await
            .map_err(|_| {
                CacheError::EmbeddingUnavailable(format!(
                    "{} provider timed out after {:?}",
                    self.embedder.provider_name(),
                    self.embed_timeout
                ))
            })??;

        vector.ensure_dimension(self.dimension)?;

        if !vector.is_finite() {
            return Err(CacheError::embedding("embedding contains non-finite values"));
        }
        if vector.is_zero() {
            return Err(CacheError::embedding("embedding is a zero vector"));
        }

        Ok(vector)
    }
}
