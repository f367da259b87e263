//! HTTP embedding provider
//!
//! Calls an external embedding server that accepts `{"text": "..."}` and
//! answers with `{"embedding": [...]}`, a bare `[...]`, or a batch `[[...]]`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::EmbeddingProvider;
use crate::cache::EmbeddingVector;
use crate::error::{CacheError, Result};

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EmbedResponse {
    Bare(Vec<f32>),
    Batch(Vec<Vec<f32>>),
    Wrapped { embedding: Vec<f32> },
}

impl EmbedResponse {
    fn into_vector(self) -> Option<Vec<f32>> {
        match self {
            EmbedResponse::Bare(vector) => Some(vector),
            EmbedResponse::Batch(batch) => batch.into_iter().next(),
            EmbedResponse::Wrapped { embedding } => Some(embedding),
        }
    }
}

/// Embedding provider backed by an HTTP embedding server.
#[derive(Debug, Clone)]
pub struct HttpEmbeddingProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpEmbeddingProvider {
    /// Creates a provider for `url` with a per-request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CacheError::embedding)?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<EmbeddingVector> {
        debug!("Requesting embedding from {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .json(&EmbedRequest { text })
            .send()
            .await
            .map_err(CacheError::embedding)?
            .error_for_status()
            .map_err(CacheError::embedding)?;

        let body: EmbedResponse = response.json().await.map_err(CacheError::embedding)?;

        body.into_vector()
            .map(EmbeddingVector::new)
            .ok_or_else(|| CacheError::embedding("embedding server returned an empty batch"))
    }

    fn provider_name(&self) -> &'static str {
        "http"
    }
}
