//! API Handlers
//!
//! HTTP request handlers for each semantic cache endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{debug, warn};

use crate::cache::JsonFileStorage;
use crate::config::Config;
use crate::embedding::HttpEmbeddingProvider;
use crate::error::{CacheError, Result};
use crate::models::{
    is_searchable, validate_record, CacheRequest, HealthResponse, MessageResponse, ResetResponse,
    SearchResponse, StatsResponse, SuccessResponse,
};
use crate::service::CacheService;

/// Application state shared across all handlers.
///
/// The handlers are the callers of `CacheService`, so the caller-side
/// length preconditions are enforced here.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache service
    pub service: CacheService,
    /// Answers must be longer than this to be recorded
    pub min_answer_length: usize,
    /// Queries shorter than this are not searched
    pub min_query_length: usize,
}

impl AppState {
    /// Creates a new AppState around a service.
    pub fn new(service: CacheService, config: &Config) -> Self {
        Self {
            service,
            min_answer_length: config.min_answer_length,
            min_query_length: config.min_query_length,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Wires the HTTP embedding provider and JSON file storage, then restores
    /// the persisted cache.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let embedder = HttpEmbeddingProvider::new(&config.embedding_url, config.embed_timeout())?;
        let storage = JsonFileStorage::new(&config.cache_file);
        let service =
            CacheService::from_config(config, Arc::new(embedder), Arc::new(storage)).await;
        Ok(Self::new(service, config))
    }
}

/// Handler for POST /message
///
/// Dispatches on the message `action`. A body that fails to deserialize is
/// answered with `{error}`. Text is trimmed before it is embedded on both paths.
pub async fn message_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CacheRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let Json(req) = payload.map_err(|rejection| {
        let message = rejection.body_text();
        debug!("Rejected message: {}", message);
        CacheError::InvalidRequest(message)
    })?;

    let response = match req {
        CacheRequest::SearchCache { text } => MessageResponse::Search(search(&state, &text).await),
        CacheRequest::CachePrompt { prompt, answer } => {
            if let Some(error_msg) = validate_record(&prompt, &answer, state.min_answer_length) {
                return Err(CacheError::InvalidRequest(error_msg));
            }
            state.service.record(prompt.trim(), &answer).await?;
            MessageResponse::Success(SuccessResponse::ok())
        }
    };

    Ok(Json(response))
}

/// Looks up `text`, degrading every failure to a miss.
async fn search(state: &AppState, text: &str) -> SearchResponse {
    if !is_searchable(text, state.min_query_length) {
        debug!("Query below {} characters, skipping search", state.min_query_length);
        return SearchResponse::no_match();
    }

    match state.service.lookup(text.trim()).await {
        Ok(found) => found.into(),
        Err(e) => {
            warn!("Search failed, treating as no match: {}", e);
            SearchResponse::no_match()
        }
    }
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.service.stats().await.into())
}

/// Handler for DELETE /cache
///
/// Removes every cached entry.
pub async fn reset_handler(State(state): State<AppState>) -> Result<Json<ResetResponse>> {
    let removed = state.service.reset().await?;
    Ok(Json(ResetResponse::new(removed)))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStorage;
    use crate::embedding::MockEmbeddingProvider;

    async fn test_state(provider: MockEmbeddingProvider) -> AppState {
        let config = Config {
            embedding_dimension: 2,
            ..Config::default()
        };
        let service = CacheService::from_config(
            &config,
            Arc::new(provider),
            Arc::new(MemoryStorage::new()),
        )
        .await;
        AppState::new(service, &config)
    }

    fn long_query() -> String {
        "how do I reverse a linked list in place".to_string()
    }

    #[tokio::test]
    async fn test_record_and_search_handler() {
        let state = test_state(MockEmbeddingProvider::new(vec![1.0, 0.0])).await;

        let req = CacheRequest::CachePrompt {
            prompt: long_query(),
            answer: "walk the list and flip each next pointer".to_string(),
        };
        let result = message_handler(State(state.clone()), Ok(Json(req))).await;
        assert!(matches!(result, Ok(Json(MessageResponse::Success(_)))));

        let req = CacheRequest::SearchCache { text: long_query() };
        let Json(response) = message_handler(State(state), Ok(Json(req))).await.unwrap();
        match response {
            MessageResponse::Search(found) => {
                assert_eq!(found.matched.unwrap().query(), long_query());
                assert!(found.similarity.unwrap() > 0.99);
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_short_query_skips_embedding() {
        let provider = Arc::new(MockEmbeddingProvider::new(vec![1.0, 0.0]));
        let config = Config {
            embedding_dimension: 2,
            ..Config::default()
        };
        let service =
            CacheService::from_config(&config, provider.clone(), Arc::new(MemoryStorage::new()))
                .await;
        let state = AppState::new(service, &config);

        let req = CacheRequest::SearchCache {
            text: "too short".to_string(),
        };
        let Json(response) = message_handler(State(state), Ok(Json(req))).await.unwrap();

        assert!(matches!(response, MessageResponse::Search(SearchResponse { matched: None, .. })));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_search_failure_degrades_to_no_match() {
        let state =
            test_state(MockEmbeddingProvider::new(vec![1.0, 0.0]).with_error("model not loaded")).await;

        let req = CacheRequest::SearchCache { text: long_query() };
        let result = message_handler(State(state), Ok(Json(req))).await;
        assert!(matches!(
            result,
            Ok(Json(MessageResponse::Search(SearchResponse { matched: None, .. })))
        ));
    }

    #[tokio::test]
    async fn test_record_and_search_embed_trimmed_text() {
        let provider = MockEmbeddingProvider::new(vec![1.0, 0.0]).with_vector(long_query(), vec![0.0, 1.0]);
        let state = test_state(provider).await;

        let req = CacheRequest::CachePrompt {
            prompt: format!("  {}\n", long_query()),
            answer: "walk the list and flip each next pointer".to_string(),
        };
        message_handler(State(state.clone()), Ok(Json(req))).await.unwrap();

        let req = CacheRequest::SearchCache {
            text: format!("\t{}  ", long_query()),
        };
        let Json(response) = message_handler(State(state), Ok(Json(req))).await.unwrap();
        match response {
            MessageResponse::Search(found) => {
                assert_eq!(found.matched.unwrap().query(), long_query());
                assert!(found.similarity.unwrap() > 0.99);
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_record_short_answer_rejected() {
        let state = test_state(MockEmbeddingProvider::new(vec![1.0, 0.0])).await;

        let req = CacheRequest::CachePrompt {
            prompt: long_query(),
            answer: "too short".to_string(),
        };
        let result = message_handler(State(state.clone()), Ok(Json(req))).await;

        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
        assert_eq!(state.service.size().await, 0);
    }

    #[tokio::test]
    async fn test_record_failure_surfaces() {
        let state =
            test_state(MockEmbeddingProvider::new(vec![1.0, 0.0]).with_error("model not loaded")).await;

        let req = CacheRequest::CachePrompt {
            prompt: long_query(),
            answer: "an answer that is long enough".to_string(),
        };
        let result = message_handler(State(state), Ok(Json(req))).await;
        assert!(matches!(result, Err(CacheError::EmbeddingUnavailable(_))));
    }

    #[tokio::test]
    async fn test_reset_and_stats_handlers() {
        let state = test_state(MockEmbeddingProvider::new(vec![1.0, 0.0])).await;
        state.service.record("q", "an answer that is long enough").await.unwrap();

        let Json(stats) = stats_handler(State(state.clone())).await;
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.records, 1);

        let Json(reset) = reset_handler(State(state.clone())).await.unwrap();
        assert_eq!(reset.removed, 1);

        let Json(stats) = stats_handler(State(state)).await;
        assert_eq!(stats.total_entries, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
