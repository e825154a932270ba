//! # vcache
//!
//! A thin facade over a remote key-value cache (Redis).
//!
//! Keys are strings or any `serde::Serialize` value. Each key is hashed to a
//! 32-character MD5 hex id, prefixed with a caller-chosen namespace, and
//! stored with an expiry that the store enforces.
//!
//! ```text
//!  (namespace, key, value, ttl)
//!        │
//!        ▼
//!  KeyEncoder ──► md5 hex ──► compose ──► "namespace.<md5>"
//!                                              │
//!                                              ▼
//!                                        StoreClient (Redis / memory)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use vcache::{CacheHandle, CallContext, Structured};
//! use vcache_config::AppConfig;
//!
//! let cache = CacheHandle::connect(&AppConfig::default()).await?;
//! let ctx = CallContext::background();
//!
//! cache.set(&ctx, "users", "alice", "{\"id\":1}").await?;
//! let hit = cache.get(&ctx, "users", "alice").await?;
//!
//! cache.set(&ctx, "search", &Structured(&query), &results).await?;
//! ```

pub mod context;
pub mod handle;
pub mod key;
pub mod metrics;
pub mod store;

pub use context::CallContext;
pub use handle::{CacheHandle, MIN_TTL};
pub use key::{compose, md5_hex, CacheKey, FnEncoder, KeyEncoder, Md5KeyEncoder, Structured, ToCacheKey};
pub use store::{create_pool, MemoryStore, RedisStore, StoreClient};
pub use vcache_core::{telemetry, VcacheError, VcacheResult};
