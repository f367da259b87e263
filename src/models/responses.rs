//! Response DTOs for the semantic cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheEntry, CacheStats, SearchMatch};

/// Response to a `searchCache` message.
///
/// Serializes as `{"match": entry, "similarity": s}` on a hit and
/// `{"match": null}` on a miss.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    #[serde(rename = "match")]
    pub matched: Option<CacheEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f32>,
}

impl SearchResponse {
    pub fn no_match() -> Self {
        Self {
            matched: None,
            similarity: None,
        }
    }
}

impl From<Option<SearchMatch>> for SearchResponse {
    fn from(found: Option<SearchMatch>) -> Self {
        match found {
            Some(SearchMatch { entry, similarity }) => Self {
                matched: Some(entry),
                similarity: Some(similarity),
            },
            None => Self::no_match(),
        }
    }
}

/// Response to a successful `cachePrompt` message.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Any successful response to `POST /message`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MessageResponse {
    Search(SearchResponse),
    Success(SuccessResponse),
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Lookups that found a match
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
    /// Answers recorded since startup
    pub records: u64,
    /// Entries evicted to stay within capacity
    pub evictions: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            records: stats.records,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the reset endpoint (DELETE /cache)
#[derive(Debug, Clone, Serialize)]
pub struct ResetResponse {
    pub message: String,
    pub removed: usize,
}

impl ResetResponse {
    pub fn new(removed: usize) -> Self {
        Self {
            message: format!("Cache cleared, {} entries removed", removed),
            removed,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
