//! In-process store with lazy expiry.
//!
//! Behaves like the Redis client for the four facade operations. Expiry uses
//! `tokio::time::Instant`, so tests running on a paused clock can step past a
//! TTL without sleeping.

use super::StoreClient;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::trace;
use vcache_core::VcacheResult;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    /// `None` when the TTL reaches past what `Instant` can represent.
    expires_at: Option<Instant>,
}

impl Entry {
    /// An entry is gone once its deadline is reached, not after.
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// In-memory [`StoreClient`]. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.read().values().filter(|e| !e.is_expired(now)).count()
    }

    /// Returns true if there are no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `key` holds a live entry.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        let now = Instant::now();
        self.entries
            .read()
            .get(key)
            .is_some_and(|e| !e.is_expired(now))
    }

    /// Remaining lifetime of `key`, if it holds a live entry.
    ///
    /// An entry whose deadline overflowed reports `Duration::MAX`.
    #[must_use]
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .read()
            .get(key)
            .filter(|e| !e.is_expired(now))
            .map(|e| e.expires_at.map_or(Duration::MAX, |at| at - now))
    }

    /// Drops every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| !e.is_expired(now));
        before - entries.len()
    }
}

#[async_trait]
impl StoreClient for MemoryStore {
    async fn ping(&self) -> VcacheResult<()> {
        Ok(())
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> VcacheResult<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now().checked_add(ttl),
        };
        self.entries.write().insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> VcacheResult<Option<String>> {
        let now = Instant::now();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        // Expired: evict unless a writer replaced it in between.
        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|e| e.is_expired(now)) {
            entries.remove(key);
            trace!(key, "Evicted expired entry");
        }
        Ok(None)
    }

    async fn del(&self, key: &str) -> VcacheResult<bool> {
        let now = Instant::now();
        let removed = self.entries.write().remove(key);
        Ok(removed.is_some_and(|e| !e.is_expired(now)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_set_then_get() {
        let store = MemoryStore::new();
        store.set("k", "v", Duration::from_secs(1)).await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_at_deadline() {
        let store = MemoryStore::new();
        store.set("k", "v", Duration::from_millis(500)).await.unwrap();

        tokio::time::advance(Duration::from_millis(499)).await;
        assert!(store.get("k").await.unwrap().is_some());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(store.get("k").await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_resets_expiry() {
        let store = MemoryStore::new();
        store.set("k", "old", Duration::from_secs(1)).await.unwrap();
        tokio::time::advance(Duration::from_millis(800)).await;

        store.set("k", "new", Duration::from_secs(1)).await.unwrap();
        tokio::time::advance(Duration::from_millis(800)).await;

        assert_eq!(store.get("k").await.unwrap(), Some("new".to_string()));
        assert_eq!(store.ttl("k"), Some(Duration::from_millis(200)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_del_reports_existence() {
        let store = MemoryStore::new();
        store.set("k", "v", Duration::from_secs(1)).await.unwrap();

        assert!(store.del("k").await.unwrap());
        assert!(!store.del("k").await.unwrap());
        assert!(!store.contains_key("k"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_del_of_expired_entry_reports_absent() {
        let store = MemoryStore::new();
        store.set("k", "v", Duration::from_millis(10)).await.unwrap();
        tokio::time::advance(Duration::from_millis(20)).await;

        assert!(!store.del("k").await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired() {
        let store = MemoryStore::new();
        store.set("short", "v", Duration::from_millis(10)).await.unwrap();
        store.set("long", "v", Duration::from_secs(10)).await.unwrap();
        tokio::time::advance(Duration::from_millis(20)).await;

        assert_eq!(store.purge_expired(), 1);
        assert!(store.contains_key("long"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unrepresentable_ttl_never_expires() {
        let store = MemoryStore::new();
        store.set("k", "v", Duration::MAX).await.unwrap();

        tokio::time::advance(Duration::from_secs(365 * 24 * 3600)).await;

        assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));
        assert_eq!(store.ttl("k"), Some(Duration::MAX));
        assert_eq!(store.purge_expired(), 0);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("k", "v", Duration::from_secs(60)).await.unwrap();

        assert_eq!(other.get("k").await.unwrap(), Some("v".to_string()));
    }
}
