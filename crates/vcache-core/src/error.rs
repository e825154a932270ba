//! Unified error type for the vcache crates.

use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for vcache.
///
/// A missing key is deliberately absent from this enum: reads report it as
/// `Ok(None)`, never as an error.
#[derive(Error, Debug)]
pub enum VcacheError {
    // ============ Store Errors ============
    /// The store could not be reached when the handle was created.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A get/set/del round trip failed for a reason other than a missing key.
    #[error("Transport error: {0}")]
    Transport(String),

    // ============ Key Errors ============
    /// The key value could not be turned into canonical bytes.
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ============ Call Context Errors ============
    /// The caller cancelled the operation while it was in flight.
    #[error("Operation cancelled")]
    Cancelled,

    /// The operation exceeded its deadline.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    // ============ Setup Errors ============
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl VcacheError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Connection(_) => "CONNECTION_ERROR",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Cancelled => "CANCELLED",
            Self::Timeout(_) => "TIMEOUT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection<T: Into<String>>(message: T) -> Self {
        Self::Connection(message.into())
    }

    /// Creates a transport error.
    #[must_use]
    pub fn transport<T: Into<String>>(message: T) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization<T: Into<String>>(message: T) -> Self {
        Self::Serialization(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if a caller may reasonably try the same call again.
    ///
    /// The facade itself never retries.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Transport(_) | Self::Timeout(_))
    }

    /// Checks if this error points at a caller contract violation rather than
    /// an unavailable store.
    #[must_use]
    pub const fn is_programmer_error(&self) -> bool {
        matches!(self, Self::Serialization(_) | Self::Configuration(_))
    }
}

impl From<serde_json::Error> for VcacheError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
