//! The cache facade.

use crate::context::CallContext;
use crate::key::{compose, KeyEncoder, Md5KeyEncoder, ToCacheKey};
use crate::metrics;
use crate::store::{RedisStore, StoreClient};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use vcache_config::{AppConfig, CacheSettings};
use vcache_core::{VcacheError, VcacheResult};

/// Shortest expiry ever sent to the store.
pub const MIN_TTL: Duration = Duration::from_millis(1);

/// Namespaced, expiring string cache over a [`StoreClient`].
///
/// Every operation addresses the store key `namespace.md5(key)` (or just
/// `md5(key)` for an empty namespace), so equal `(namespace, key)` pairs
/// always reach the same entry. A missing or expired entry reads as
/// `Ok(None)`. Other store failures are returned once, without retry.
#[derive(Clone)]
pub struct CacheHandle<S> {
    store: S,
    encoder: Arc<dyn KeyEncoder>,
    default_ttl: Duration,
    operation_timeout: Option<Duration>,
    metrics_enabled: bool,
}

impl CacheHandle<RedisStore> {
    /// Connects to the Redis server described by `config`.
    ///
    /// Fails with [`VcacheError::Connection`] if the server does not answer
    /// `PING` within `cache.connect_timeout_ms`.
    pub async fn connect(config: &AppConfig) -> VcacheResult<Self> {
        let store = RedisStore::from_config(&config.redis)?;
        Self::new(store, config.cache.clone()).await
    }
}

impl<S: StoreClient> CacheHandle<S> {
    /// Creates a handle after probing `store` for liveness.
    ///
    /// The probe is bounded by `settings.connect_timeout()`; a failed or
    /// timed-out probe yields [`VcacheError::Connection`] and no handle.
    pub async fn new(store: S, settings: CacheSettings) -> VcacheResult<Self> {
        let timeout = settings.connect_timeout();

        match tokio::time::timeout(timeout, store.ping()).await {
            Ok(Ok(())) => info!("Cache store is reachable"),
            Ok(Err(e)) => {
                warn!(error = %e, "Cache store liveness probe failed");
                return Err(VcacheError::Connection(format!("Liveness probe failed: {}", e)));
            }
            Err(_) => {
                warn!(timeout_ms = settings.connect_timeout_ms, "Cache store liveness probe timed out");
                return Err(VcacheError::Connection(format!(
                    "Liveness probe timed out after {:?}",
                    timeout
                )));
            }
        }

        if settings.metrics_enabled {
            metrics::register_metrics();
        }

        Ok(Self {
            store,
            encoder: Arc::new(Md5KeyEncoder),
            default_ttl: settings.default_ttl(),
            operation_timeout: settings.operation_timeout(),
            metrics_enabled: settings.metrics_enabled,
        })
    }

    /// Replaces the key encoder.
    #[must_use]
    pub fn with_encoder(mut self, encoder: impl KeyEncoder + 'static) -> Self {
        self.encoder = Arc::new(encoder);
        self
    }

    /// Expiry used by [`set`](Self::set) and [`must_set`](Self::must_set).
    #[must_use]
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Returns the underlying store client.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The store key that `(namespace, key)` maps to.
    pub fn store_key<K: ToCacheKey + ?Sized>(&self, namespace: &str, key: &K) -> VcacheResult<String> {
        let key = key.to_cache_key()?;
        let encoded = self.encoder.encode(&key)?;
        Ok(compose(namespace, &encoded))
    }

    /// Writes `value` with the default expiry (one minute unless configured).
    pub async fn set<K: ToCacheKey + ?Sized>(
        &self,
        ctx: &CallContext,
        namespace: &str,
        key: &K,
        value: &str,
    ) -> VcacheResult<()> {
        self.set_with_ttl(ctx, namespace, key, value, self.default_ttl).await
    }

    /// Writes `value` expiring after `ttl`.
    ///
    /// Replaces any existing entry and its expiry. `ttl` is raised to
    /// [`MIN_TTL`] if shorter.
    pub async fn set_with_ttl<K: ToCacheKey + ?Sized>(
        &self,
        ctx: &CallContext,
        namespace: &str,
        key: &K,
        value: &str,
        ttl: Duration,
    ) -> VcacheResult<()> {
        let store_key = self.store_key(namespace, key)?;
        let ttl = ttl.max(MIN_TTL);

        self.observe(ctx, "set", metrics::outcome, self.store.set(&store_key, value, ttl))
            .await?;

        debug!("Cached key '{}' for {:?}", store_key, ttl);
        Ok(())
    }

    /// Writes `value` with the default expiry, panicking on any failure.
    ///
    /// Only for paths where a cache outage should take the task down.
    ///
    /// # Panics
    ///
    /// Panics if the key cannot be serialized or the store write fails.
    pub async fn must_set<K: ToCacheKey + ?Sized>(&self, namespace: &str, key: &K, value: &str) {
        self.must_set_with_ttl(namespace, key, value, self.default_ttl).await;
    }

    /// Writes `value` expiring after `ttl`, panicking on any failure.
    ///
    /// # Panics
    ///
    /// Panics if the key cannot be serialized or the store write fails.
    pub async fn must_set_with_ttl<K: ToCacheKey + ?Sized>(
        &self,
        namespace: &str,
        key: &K,
        value: &str,
        ttl: Duration,
    ) {
        if let Err(e) = self
            .set_with_ttl(&CallContext::background(), namespace, key, value, ttl)
            .await
        {
            panic!("cache write to namespace '{}' failed: {}", namespace, e);
        }
    }

    /// Reads the value under `(namespace, key)`.
    ///
    /// Returns `Ok(None)` if it was never written, has expired or was deleted.
    pub async fn get<K: ToCacheKey + ?Sized>(
        &self,
        ctx: &CallContext,
        namespace: &str,
        key: &K,
    ) -> VcacheResult<Option<String>> {
        let store_key = self.store_key(namespace, key)?;

        let value = self
            .observe(ctx, "get", hit_or_miss, self.store.get(&store_key))
            .await?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", store_key),
            None => debug!("Cache miss for key '{}'", store_key),
        }

        Ok(value)
    }

    /// Removes the entry under `(namespace, key)`. Removing a missing entry
    /// succeeds.
    pub async fn delete<K: ToCacheKey + ?Sized>(
        &self,
        ctx: &CallContext,
        namespace: &str,
        key: &K,
    ) -> VcacheResult<()> {
        let store_key = self.store_key(namespace, key)?;

        let existed = self
            .observe(ctx, "del", metrics::outcome, self.store.del(&store_key))
            .await?;

        debug!("Deleted key '{}': {}", store_key, existed);
        Ok(())
    }

    async fn observe<T, F>(
        &self,
        ctx: &CallContext,
        op: &'static str,
        label: fn(&VcacheResult<T>) -> &'static str,
        fut: F,
    ) -> VcacheResult<T>
    where
        F: Future<Output = VcacheResult<T>>,
    {
        let started = Instant::now();
        let result = ctx.run(self.operation_timeout, fut).await;

        if let Err(e) = &result {
            warn!(op, error = %e, retriable = e.is_retriable(), "Cache operation failed");
        }
        if self.metrics_enabled {
            metrics::record(op, label(&result), started.elapsed());
        }

        result
    }
}

fn hit_or_miss(result: &VcacheResult<Option<String>>) -> &'static str {
    match result {
        Ok(Some(_)) => "hit",
        Ok(None) => "miss",
        Err(_) => metrics::outcome(result),
    }
}
