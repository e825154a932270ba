//! Configuration validation module.
//!
//! Rejects unusable configuration when it is loaded rather than on the first
//! cache call.

use crate::AppConfig;
use std::fmt;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// Redis address is empty.
    MissingAddress,
    /// Redis address does not form a valid URL.
    InvalidAddress { address: String, message: String },
    /// Logical database index is negative.
    InvalidDatabase { value: i64 },
    /// Pool size is zero.
    EmptyPool,
    /// Pool size exceeds maximum allowed.
    PoolSizeTooLarge { value: usize, maximum: usize },
    /// Timeout or TTL value must be positive.
    NonPositiveDuration { name: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAddress => write!(f, "Redis address is required"),
            Self::InvalidAddress { address, message } => {
                write!(f, "Invalid Redis address '{}': {}", address, message)
            }
            Self::InvalidDatabase { value } => {
                write!(f, "Invalid Redis database index: {} (must be >= 0)", value)
            }
            Self::EmptyPool => write!(f, "Redis pool size must be at least 1"),
            Self::PoolSizeTooLarge { value, maximum } => {
                write!(
                    f,
                    "Pool size {} exceeds maximum allowed ({})",
                    value, maximum
                )
            }
            Self::NonPositiveDuration { name } => {
                write!(f, "{} must be greater than zero", name)
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Result of configuration validation containing all errors found.
#[derive(Debug)]
pub struct ValidationResult {
    errors: Vec<ConfigValidationError>,
}

impl ValidationResult {
    fn new() -> Self {
        Self { errors: Vec::new() }
    }

    fn add_error(&mut self, error: ConfigValidationError) {
        self.errors.push(error);
    }

    /// Returns true if validation passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the validation errors.
    pub fn errors(&self) -> &[ConfigValidationError] {
        &self.errors
    }

    /// Converts to Result, returning Err with all errors if any exist.
    pub fn into_result(self) -> Result<(), Vec<ConfigValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Maximum connection pool size.
    const MAX_POOL_SIZE: usize = 1000;

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut result = ValidationResult::new();

        Self::validate_redis(&config.redis, &mut result);
        Self::validate_cache(&config.cache, &mut result);

        result.into_result()
    }

    fn validate_redis(config: &crate::RedisConfig, result: &mut ValidationResult) {
        if config.address.trim().is_empty() {
            result.add_error(ConfigValidationError::MissingAddress);
        } else if let Err(e) = config.url() {
            result.add_error(ConfigValidationError::InvalidAddress {
                address: config.address.clone(),
                message: e.to_string(),
            });
        }

        if config.database < 0 {
            result.add_error(ConfigValidationError::InvalidDatabase {
                value: config.database,
            });
        }

        if config.pool_size == 0 {
            result.add_error(ConfigValidationError::EmptyPool);
        } else if config.pool_size > Self::MAX_POOL_SIZE {
            result.add_error(ConfigValidationError::PoolSizeTooLarge {
                value: config.pool_size,
                maximum: Self::MAX_POOL_SIZE,
            });
        }
    }

    fn validate_cache(config: &crate::CacheSettings, result: &mut ValidationResult) {
        if config.default_ttl_ms == 0 {
            result.add_error(ConfigValidationError::NonPositiveDuration {
                name: "cache.default_ttl_ms".to_string(),
            });
        }
        if config.connect_timeout_ms == 0 {
            result.add_error(ConfigValidationError::NonPositiveDuration {
                name: "cache.connect_timeout_ms".to_string(),
            });
        }
        if config.operation_timeout_ms == Some(0) {
            result.add_error(ConfigValidationError::NonPositiveDuration {
                name: "cache.operation_timeout_ms".to_string(),
            });
        }
    }
}

/// Formats validation errors for display.
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}
