//! Redis-backed store client.

use super::StoreClient;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Config, Connection, Pool, Runtime};
use std::time::Duration;
use tracing::{debug, info};
use vcache_config::RedisConfig;
use vcache_core::{VcacheError, VcacheResult};

/// Create a Redis connection pool.
///
/// No connection is opened here; the first checkout (normally the handle's
/// liveness probe) does that.
pub fn create_pool(config: &RedisConfig) -> VcacheResult<Pool> {
    let url = config.url()?;

    let pool = Config::from_url(url)
        .builder()
        .map_err(|e| VcacheError::Configuration(format!("Invalid Redis config: {}", e)))?
        .max_size(config.pool_size)
        .runtime(Runtime::Tokio1)
        .build()
        .map_err(|e| VcacheError::Configuration(format!("Failed to create pool: {}", e)))?;

    info!(
        address = %config.address,
        database = config.database,
        pool_size = config.pool_size,
        "Created Redis connection pool"
    );

    Ok(pool)
}

/// [`StoreClient`] over a `deadpool-redis` pool.
#[derive(Clone)]
pub struct RedisStore {
    pool: Pool,
}

impl RedisStore {
    /// Wraps an existing pool.
    #[must_use]
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Builds a pool from `config` and wraps it.
    pub fn from_config(config: &RedisConfig) -> VcacheResult<Self> {
        Ok(Self::new(create_pool(config)?))
    }

    /// Returns the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    async fn conn(&self) -> VcacheResult<Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| VcacheError::Transport(format!("Failed to get Redis connection: {}", e)))
    }
}

/// Longest expiry sent to Redis. Redis adds the TTL to the current unix time
/// in milliseconds as a signed 64-bit value and rejects a sum that overflows.
const MAX_TTL_MS: u64 = 1 << 62;

/// PSETEX takes whole milliseconds and rejects zero.
fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis())
        .unwrap_or(MAX_TTL_MS)
        .clamp(1, MAX_TTL_MS)
}

#[async_trait]
impl StoreClient for RedisStore {
    async fn ping(&self) -> VcacheResult<()> {
        let mut conn = self.conn().await?;
        deadpool_redis::redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| VcacheError::Transport(format!("PING failed: {}", e)))?;
        Ok(())
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> VcacheResult<()> {
        let mut conn = self.conn().await?;
        let ttl_ms = ttl_millis(ttl);

        conn.pset_ex::<_, _, ()>(key, value, ttl_ms).await.map_err(|e| {
            VcacheError::Transport(format!("Failed to set key '{}': {}", key, e))
        })?;

        debug!("Stored key '{}' with TTL {}ms", key, ttl_ms);
        Ok(())
    }

    async fn get(&self, key: &str) -> VcacheResult<Option<String>> {
        let mut conn = self.conn().await?;
        conn.get(key).await.map_err(|e| {
            VcacheError::Transport(format!("Failed to get key '{}': {}", key, e))
        })
    }

    async fn del(&self, key: &str) -> VcacheResult<bool> {
        let mut conn = self.conn().await?;
        let deleted: i64 = conn.del(key).await.map_err(|e| {
            VcacheError::Transport(format!("Failed to delete key '{}': {}", key, e))
        })?;
        Ok(deleted > 0)
    }
}
