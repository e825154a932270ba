//! Tracing subscriber setup.
//!
//! The library crates only emit `tracing` events. Binaries and test harnesses
//! that want to see them call [`init_telemetry`] once at startup with the
//! `telemetry` feature enabled.

#[cfg(feature = "telemetry")]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::VcacheResult;
use serde::{Deserialize, Serialize};

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name attached to the startup event.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,

    /// Whether to enable console output.
    #[serde(default = "default_console_output")]
    pub console_output: bool,
}

fn default_service_name() -> String {
    "vcache".to_string()
}

fn default_log_filter() -> String {
    "info,vcache=debug".to_string()
}

fn default_console_output() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            log_filter: default_log_filter(),
            json: false,
            console_output: default_console_output(),
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Fails if a global subscriber is already installed.
#[cfg(feature = "telemetry")]
pub fn init_telemetry(config: &TelemetryConfig) -> VcacheResult<()> {
    if !config.console_output {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let result = if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };

    result.map_err(|e| crate::VcacheError::Internal(format!("Failed to install tracing subscriber: {}", e)))?;

    tracing::info!(
        service_name = %config.service_name,
        json = config.json,
        "Telemetry initialized"
    );

    Ok(())
}

/// Placeholder for when telemetry feature is disabled.
#[cfg(not(feature = "telemetry"))]
pub fn init_telemetry(_config: &TelemetryConfig) -> VcacheResult<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "vcache");
        assert_eq!(config.log_filter, "info,vcache=debug");
        assert!(!config.json);
        assert!(config.console_output);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: TelemetryConfig = serde_json::from_str(r#"{"json": true}"#).unwrap();
        assert!(config.json);
        assert_eq!(config.service_name, "vcache");
    }

    #[test]
    fn test_disabled_console_is_noop() {
        let config = TelemetryConfig {
            console_output: false,
            ..TelemetryConfig::default()
        };
        assert!(init_telemetry(&config).is_ok());
    }
}
