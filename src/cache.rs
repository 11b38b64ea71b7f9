//! Short-lived in-memory response cache.
//!
//! LRU-bounded with per-entry TTL; expiry is checked on read, so stale
//! entries cost nothing until touched. Process-lifetime only — there is no
//! persistence layer behind this.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Maximum number of cached responses kept in memory.
const CACHE_SIZE: usize = 256;

/// TTL applied when the caller does not pick one.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    inserted: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.inserted.elapsed() > self.ttl
    }
}

/// Bounded TTL cache for rendered tool responses.
#[derive(Debug)]
pub struct ResponseCache {
    entries: RwLock<LruCache<String, CacheEntry>>,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(LruCache::new(
                NonZeroUsize::new(CACHE_SIZE).expect("cache size is non-zero"),
            )),
        }
    }

    /// Returns the cached value, evicting it first if the TTL has lapsed.
    pub async fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.write().await;
        match entries.get(key).cloned() {
            Some(entry) if entry.is_expired() => {
                entries.pop(key);
                None
            }
            Some(entry) => Some(entry.value),
            None => None,
        }
    }

    /// Stores a value under [`DEFAULT_TTL`].
    pub async fn put(&self, key: String, value: String) {
        self.put_with_ttl(key, value, DEFAULT_TTL).await;
    }

    pub async fn put_with_ttl(&self, key: String, value: String, ttl: Duration) {
        let mut entries = self.entries.write().await;
        entries.put(
            key,
            CacheEntry {
                value,
                inserted: Instant::now(),
                ttl,
            },
        );
    }
}
