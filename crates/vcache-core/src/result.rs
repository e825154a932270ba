//! Result type aliases for vcache.

use crate::VcacheError;

/// A specialized `Result` type for vcache operations.
pub type VcacheResult<T> = Result<T, VcacheError>;
