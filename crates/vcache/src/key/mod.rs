//! Cache keys and their mapping to store identifiers.
//!
//! A key is either a raw string, whose bytes are hashed as-is, or any
//! `serde::Serialize` value, which is first rendered to canonical JSON.
//! Object fields are sorted recursively before rendering, so two values that
//! differ only in field declaration order name the same entry.

mod encoder;
pub mod namespace;

pub use encoder::{md5_hex, FnEncoder, KeyEncoder, Md5KeyEncoder};
pub use namespace::compose;

use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use vcache_core::VcacheResult;

/// A cache key in one of its two supported shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheKey<'a> {
    /// A plain string, hashed by its UTF-8 bytes.
    Raw(Cow<'a, str>),
    /// A structured value in canonical (sorted-field) form.
    Structured(Value),
}

impl<'a> CacheKey<'a> {
    /// Creates a raw string key.
    pub fn raw(key: impl Into<Cow<'a, str>>) -> Self {
        Self::Raw(key.into())
    }

    /// Creates a structured key from any serializable value.
    ///
    /// Fails when the value has no JSON form, e.g. a map with non-string keys.
    pub fn structured<T: Serialize + ?Sized>(value: &T) -> VcacheResult<CacheKey<'static>> {
        let value = serde_json::to_value(value)?;
        Ok(CacheKey::Structured(canonicalize(value)))
    }

    /// Returns the bytes the digest is computed over.
    pub fn to_bytes(&self) -> VcacheResult<Cow<'_, [u8]>> {
        match self {
            Self::Raw(s) => Ok(Cow::Borrowed(s.as_bytes())),
            Self::Structured(value) => Ok(Cow::Owned(serde_json::to_vec(value)?)),
        }
    }
}

impl<'a> From<&'a str> for CacheKey<'a> {
    fn from(key: &'a str) -> Self {
        Self::Raw(Cow::Borrowed(key))
    }
}

impl From<String> for CacheKey<'static> {
    fn from(key: String) -> Self {
        Self::Raw(Cow::Owned(key))
    }
}

/// Anything the facade accepts as a key.
///
/// Strings map to [`CacheKey::Raw`]. Wrap other values in [`Structured`].
pub trait ToCacheKey {
    /// Converts `self` into a cache key.
    fn to_cache_key(&self) -> VcacheResult<CacheKey<'_>>;
}

impl ToCacheKey for str {
    fn to_cache_key(&self) -> VcacheResult<CacheKey<'_>> {
        Ok(CacheKey::Raw(Cow::Borrowed(self)))
    }
}

impl ToCacheKey for String {
    fn to_cache_key(&self) -> VcacheResult<CacheKey<'_>> {
        Ok(CacheKey::Raw(Cow::Borrowed(self.as_str())))
    }
}

impl ToCacheKey for CacheKey<'_> {
    fn to_cache_key(&self) -> VcacheResult<CacheKey<'_>> {
        Ok(match self {
            Self::Raw(s) => CacheKey::Raw(Cow::Borrowed(s.as_ref())),
            Self::Structured(value) => CacheKey::Structured(value.clone()),
        })
    }
}

/// Marks a value as a structured key.
///
/// `Structured("id")` is hashed as the JSON string `"id"` (with quotes) and
/// therefore never collides with the raw key `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Structured<T>(pub T);

impl<T: Serialize> ToCacheKey for Structured<T> {
    fn to_cache_key(&self) -> VcacheResult<CacheKey<'_>> {
        CacheKey::structured(&self.0)
    }
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, canonicalize(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}
