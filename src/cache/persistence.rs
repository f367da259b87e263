//! Persistence Module
//!
//! Defines the persisted record shape and the storage backends that read and
//! write it.

use std::fmt::Debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::cache::CacheEntry;
use crate::error::{CacheError, Result};

// == Persisted Record ==
/// On-disk shape of the cache: `{ "cache": [entry, ...] }` in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedCache {
    #[serde(default)]
    pub cache: Vec<CacheEntry>,
}

impl PersistedCache {
    pub fn new(cache: Vec<CacheEntry>) -> Self {
        Self { cache }
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

// == Storage Trait ==
/// Reads and writes the persisted record.
///
/// `load` returns `Ok(None)` when nothing has been persisted yet. `save` is
/// awaited while the store write lock is held, so implementations must not
/// block the runtime.
#[async_trait]
pub trait CacheStorage: Send + Sync + Debug {
    async fn load(&self) -> Result<Option<PersistedCache>>;

    async fn save(&self, record: &PersistedCache) -> Result<()>;
}

// == JSON File Storage ==
/// Stores the record as a JSON file.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so readers never observe a partially written record.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "cache".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl CacheStorage for JsonFileStorage {
    async fn load(&self) -> Result<Option<PersistedCache>> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No persisted cache at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(CacheError::persistence(e)),
        };

        if contents.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(CacheError::persistence)
    }

    async fn save(&self, record: &PersistedCache) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(CacheError::persistence)?;
        }

        let json = serde_json::to_vec(record).map_err(CacheError::persistence)?;
        let temp = self.temp_path();
        fs::write(&temp, json)
            .await
            .map_err(CacheError::persistence)?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(CacheError::persistence)?;

        debug!(
            "Persisted {} entries to {}",
            record.cache.len(),
            self.path.display()
        );
        Ok(())
    }
}

// == Memory Storage ==
/// Keeps the last saved record in memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    record: Mutex<Option<PersistedCache>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with an already persisted record.
    pub fn with_record(record: PersistedCache) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }
}

#[async_trait]
impl CacheStorage for MemoryStorage {
    async fn load(&self) -> Result<Option<PersistedCache>> {
        let guard = self
            .record
            .lock()
            .map_err(|e| CacheError::persistence(format!("storage lock poisoned: {}", e)))?;
        Ok(guard.clone())
    }

    async fn save(&self, record: &PersistedCache) -> Result<()> {
        let mut guard = self
            .record
            .lock()
            .map_err(|e| CacheError::persistence(format!("storage lock poisoned: {}", e)))?;
        *guard = Some(record.clone());
        Ok(())
    }
}
