//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default maximum number of cached entries
pub const DEFAULT_MAX_CAPACITY: usize = 100;
/// Default similarity a match must strictly exceed
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.92;
/// Answers must be strictly longer than this before they are recorded
pub const DEFAULT_MIN_ANSWER_LENGTH: usize = 10;
/// Queries shorter than this are not searched
pub const DEFAULT_MIN_QUERY_LENGTH: usize = 25;
/// Output dimension of all-MiniLM-L6-v2
pub const DEFAULT_EMBEDDING_DIMENSION: usize = 384;

/// Semantic cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold (at least 1)
    pub max_capacity: usize,
    /// A lookup matches only when its best similarity is strictly above this
    pub similarity_threshold: f32,
    /// Minimum answer length (exclusive) accepted by the record endpoint
    pub min_answer_length: usize,
    /// Minimum query length (inclusive) accepted by the search endpoint
    pub min_query_length: usize,
    /// Dimension every embedding must have
    pub embedding_dimension: usize,
    /// Endpoint of the external embedding server
    pub embedding_url: String,
    /// Per-call timeout for the embedding server in milliseconds
    pub embed_timeout_ms: u64,
    /// Path of the persisted cache record
    pub cache_file: PathBuf,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_CAPACITY` - Maximum cache entries (default: 100)
    /// - `SIMILARITY_THRESHOLD` - Match threshold (default: 0.92)
    /// - `MIN_ANSWER_LENGTH` - Answers must be longer than this (default: 10)
    /// - `MIN_QUERY_LENGTH` - Shortest searchable query (default: 25)
    /// - `EMBEDDING_DIMENSION` - Embedding dimension (default: 384)
    /// - `EMBEDDING_URL` - Embedding server endpoint (default: http://127.0.0.1:8080/embed)
    /// - `EMBED_TIMEOUT_MS` - Embedding call timeout (default: 10000)
    /// - `CACHE_FILE` - Persisted cache path (default: semantic_cache.json)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_capacity: env_or("MAX_CAPACITY", defaults.max_capacity),
            similarity_threshold: env_or("SIMILARITY_THRESHOLD", defaults.similarity_threshold),
            min_answer_length: env_or("MIN_ANSWER_LENGTH", defaults.min_answer_length),
            min_query_length: env_or("MIN_QUERY_LENGTH", defaults.min_query_length),
            embedding_dimension: env_or("EMBEDDING_DIMENSION", defaults.embedding_dimension),
            embedding_url: env::var("EMBEDDING_URL").unwrap_or(defaults.embedding_url),
            embed_timeout_ms: env_or("EMBED_TIMEOUT_MS", defaults.embed_timeout_ms),
            cache_file: env::var("CACHE_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_file),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
        .normalized()
    }

    /// Clamps values that would break store or search invariants.
    pub fn normalized(mut self) -> Self {
        self.max_capacity = self.max_capacity.max(1);
        self.embedding_dimension = self.embedding_dimension.max(1);
        if self.similarity_threshold.is_nan() {
            self.similarity_threshold = DEFAULT_SIMILARITY_THRESHOLD;
        }
        self.similarity_threshold = self.similarity_threshold.clamp(-1.0, 1.0);
        self
    }

    /// Returns the embedding timeout as a Duration.
    pub fn embed_timeout(&self) -> Duration {
        Duration::from_millis(self.embed_timeout_ms)
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_capacity: DEFAULT_MAX_CAPACITY,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            min_answer_length: DEFAULT_MIN_ANSWER_LENGTH,
            min_query_length: DEFAULT_MIN_QUERY_LENGTH,
            embedding_dimension: DEFAULT_EMBEDDING_DIMENSION,
            embedding_url: "http://127.0.0.1:8080/embed".to_string(),
            embed_timeout_ms: 10_000,
            cache_file: PathBuf::from("semantic_cache.json"),
            server_port: 3000,
        }
    }
}
