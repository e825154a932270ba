//! Key encoders.

use super::CacheKey;
use md5::{Digest, Md5};
use vcache_core::VcacheResult;

/// Maps a cache key to a stable string identifier.
///
/// Implementations must be pure: equal keys always produce equal identifiers.
pub trait KeyEncoder: Send + Sync {
    /// Encodes `key`.
    fn encode(&self, key: &CacheKey<'_>) -> VcacheResult<String>;
}

/// Default encoder: 32 lowercase hex characters of the key's MD5 digest.
///
/// MD5 is used for identity only. It offers no protection against callers
/// who deliberately craft colliding keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5KeyEncoder;

impl KeyEncoder for Md5KeyEncoder {
    fn encode(&self, key: &CacheKey<'_>) -> VcacheResult<String> {
        let bytes = key.to_bytes()?;
        Ok(md5_hex(&bytes))
    }
}

/// Adapts a plain function or closure into a [`KeyEncoder`].
#[derive(Debug, Clone, Copy)]
pub struct FnEncoder<F>(pub F);

impl<F> FnEncoder<F>
where
    F: Fn(&CacheKey<'_>) -> VcacheResult<String> + Send + Sync,
{
    /// Wraps `f`.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> KeyEncoder for FnEncoder<F>
where
    F: Fn(&CacheKey<'_>) -> VcacheResult<String> + Send + Sync,
{
    fn encode(&self, key: &CacheKey<'_>) -> VcacheResult<String> {
        (self.0)(key)
    }
}

/// Lowercase hex MD5 digest of `bytes`.
#[must_use]
pub fn md5_hex(bytes: &[u8]) -> String {
    hex::encode(Md5::digest(bytes))
}
