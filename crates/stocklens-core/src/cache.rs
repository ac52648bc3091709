//! In-memory TTL cache for rendered responses.
//!
//! The HTTP layer caches the JSON bodies of expensive endpoints (the
//! snapshot and top-gainers routes hit the upstream provider for every
//! miss) for a fixed time-to-live, keyed by request path.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry {
    body: String,
    expires_at: Instant,
}

/// Thread-safe response cache with a single store-wide TTL.
#[derive(Debug, Clone)]
pub struct CacheStore {
    ttl: Duration,
    entries: Arc<tokio::sync::RwLock<HashMap<String, CacheEntry>>>,
}

impl CacheStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(tokio::sync::RwLock::new(HashMap::new())),
        }
    }

    /// Look up a non-expired entry.
    pub async fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().await;
        entries.get(key).and_then(|entry| {
            if Instant::now() <= entry.expires_at {
                Some(entry.body.clone())
            } else {
                None
            }
        })
    }

    /// Store a body under `key`, replacing any previous entry. Expired
    /// entries are swept opportunistically on write.
    pub async fn put(&self, key: impl Into<String>, body: impl Into<String>) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.into(),
            CacheEntry {
                body: body.into(),
                expires_at: now + self.ttl,
            },
        );
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_returns_within_ttl() {
        let cache = CacheStore::new(Duration::from_secs(60));
        cache.put("/gainers", "[]").await;
        assert_eq!(cache.get("/gainers").await.as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn expired_entries_are_not_returned() {
        let cache = CacheStore::new(Duration::from_millis(1));
        cache.put("/gainers", "[]").await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(cache.get("/gainers").await, None);
    }

    #[tokio::test]
    async fn writes_sweep_expired_entries() {
        let cache = CacheStore::new(Duration::from_millis(1));
        cache.put("/a", "1").await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        cache.put("/b", "2").await;
        assert_eq!(cache.len().await, 1);
    }
}
