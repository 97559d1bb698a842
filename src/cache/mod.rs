//! Response Cache Module
//!
//! Persistent caching of decoded responses is delegated to a [`BlobStore`]
//! capability (get/set by key, with tags and TTL). [`ResponseCache`] layers
//! the fixed namespace tag and the JSON round-trip on top of it. Entries are
//! written on successful responses when the adapter declares a cache key and
//! expire only through the store's TTL semantics.

pub mod identifier;

use crate::error::RestError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Namespace tag every response cache entry is stored under.
pub const CACHE_TAG: &str = "rest_api_result";

/// Key/value blob storage with TTL, shared across processes in production
/// deployments (Redis, memcached, ...).
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch a value; `None` on miss or expiry.
    async fn get(&self, key: &str) -> Option<String>;

    /// Store a value under the given tags. `ttl = None` means the store's
    /// default lifetime.
    async fn set(&self, key: &str, value: String, tags: &[&str], ttl: Option<Duration>);
}

/// Serialized-response cache on top of a [`BlobStore`].
#[derive(Clone)]
pub struct ResponseCache {
    store: std::sync::Arc<dyn BlobStore>,
}

impl ResponseCache {
    pub fn new(store: std::sync::Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Load and decode a cached response. A corrupt entry is an internal
    /// error rather than a miss: it means something else wrote under our
    /// namespace.
    pub async fn load(&self, key: &str) -> Result<Option<Value>, RestError> {
        match self.store.get(key).await {
            Some(serialized) => {
                let value = serde_json::from_str(&serialized)
                    .map_err(|e| RestError::Internal(format!("corrupt cache entry: {e}")))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Serialize and store a response under the namespace tag.
    pub async fn save(
        &self,
        key: &str,
        value: &Value,
        ttl: Option<Duration>,
    ) -> Result<(), RestError> {
        let serialized = serde_json::to_string(value)?;
        self.store.set(key, serialized, &[CACHE_TAG], ttl).await;
        Ok(())
    }
}

/// In-memory [`BlobStore`] with instant-based expiry. Default store for
/// tests and single-process deployments.
#[derive(Default)]
pub struct InMemoryBlobStore {
    entries: Mutex<HashMap<String, StoredEntry>>,
}

struct StoredEntry {
    value: String,
    expires_at: Option<Instant>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().expect("blob store poisoned");
        match entries.get(key) {
            Some(entry) if entry.expires_at.is_none_or(|at| at > Instant::now()) => {
                Some(entry.value.clone())
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn set(&self, key: &str, value: String, _tags: &[&str], ttl: Option<Duration>) {
        let expires_at = ttl.map(|t| Instant::now() + t);
        self.entries
            .lock()
            .expect("blob store poisoned")
            .insert(key.to_string(), StoredEntry { value, expires_at });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn round_trips_every_response_shape() {
        let cache = ResponseCache::new(Arc::new(InMemoryBlobStore::new()));
        for (key, value) in [
            ("scalar", json!("plain text")),
            ("number", json!(3.5)),
            ("boolean", json!(true)),
            ("null", json!(null)),
            ("array", json!([1, "two", null])),
            ("nested", json!({"a": {"b": [1, 2]}, "c": "d"})),
        ] {
            cache.save(key, &value, None).await.unwrap();
            assert_eq!(cache.load(key).await.unwrap(), Some(value));
        }
    }

    #[tokio::test]
    async fn miss_returns_none() {
        let cache = ResponseCache::new(Arc::new(InMemoryBlobStore::new()));
        assert_eq!(cache.load("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let store = InMemoryBlobStore::new();
        store
            .set("k", "v".into(), &[CACHE_TAG], Some(Duration::from_millis(10)))
            .await;
        assert_eq!(store.get("k").await, Some("v".into()));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(store.get("k").await, None);
    }

    #[tokio::test]
    async fn corrupt_entry_is_an_internal_error() {
        let store = Arc::new(InMemoryBlobStore::new());
        store.set("k", "not json {".into(), &[CACHE_TAG], None).await;
        let cache = ResponseCache::new(store);
        assert!(matches!(
            cache.load("k").await,
            Err(RestError::Internal(_))
        ));
    }
}
