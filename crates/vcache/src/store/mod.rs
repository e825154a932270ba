//! Store clients the facade delegates to.
//!
//! The facade only relies on the four operations of [`StoreClient`]. Expiry,
//! pooling and thread-safety are the client's responsibility.

mod memory_store;
mod redis_store;

pub use memory_store::MemoryStore;
pub use redis_store::{create_pool, RedisStore};

use async_trait::async_trait;
use std::time::Duration;
use vcache_core::VcacheResult;

/// A remote key-value store with per-entry expiry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Liveness probe.
    async fn ping(&self) -> VcacheResult<()>;

    /// Writes `value` under `key`, replacing any existing entry and its expiry.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> VcacheResult<()>;

    /// Reads `key`. A missing or expired entry is `Ok(None)`.
    async fn get(&self, key: &str) -> VcacheResult<Option<String>>;

    /// Removes `key`, returning whether it existed.
    async fn del(&self, key: &str) -> VcacheResult<bool>;
}
