//! In-memory secret cache with LRU eviction.
//!
//! Thread-safe: the store sits behind a tokio `RwLock` and the handle is
//! cheap to clone.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;
use serde_json::Value;
use tokio::sync::RwLock;

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(value: Value, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

/// Parsed secrets keyed by `{region}:{name}`.
///
/// Bounded by `max_entries` (least recently used entries are evicted first)
/// and optionally by a TTL, checked lazily on read.
#[derive(Debug, Clone)]
pub struct SecretCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
    ttl: Option<Duration>,
}

impl SecretCache {
    /// Creates a new cache. A `max_entries` of zero is treated as one.
    pub fn new(max_entries: usize, ttl: Option<Duration>) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
            ttl,
        }
    }

    pub async fn get(&self, key: &str) -> Option<Value> {
        let mut store = self.store.write().await;

        let expired = match store.get(key) {
            Some(entry) if !entry.is_expired() => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };

        if expired {
            store.pop(key);
        }
        None
    }

    pub async fn insert(&self, key: &str, value: Value) {
        let mut store = self.store.write().await;
        store.put(key.to_string(), CacheEntry::new(value, self.ttl));
    }

    pub async fn remove(&self, key: &str) -> Option<Value> {
        self.store.write().await.pop(key).map(|entry| entry.value)
    }

    pub async fn clear(&self) {
        self.store.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}
