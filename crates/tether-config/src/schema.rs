//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly;
//! missing fields are filled with the defaults below.

use serde::{Deserialize, Serialize};
use tether_common::{ConfigError, DeliveryRate};

/// Top-level bridge configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TetherConfig {
    pub dispatch: DispatchConfig,
    pub sensors: SensorConfig,
    pub logging: LoggingConfig,
}

/// Main-thread dispatch queue tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Queue depth at which `post` starts warning about a slow consumer.
    pub queue_warn_depth: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            queue_warn_depth: 64,
        }
    }
}

/// Sensor subscription tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Delivery-rate hint passed to the sensor subsystem.
    pub rate: DeliveryRate,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            rate: DeliveryRate::Normal,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default env-filter directive when `RUST_LOG` is not set.
    pub directive: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directive: "tether=info".into(),
        }
    }
}

/// Reject configs that would misbehave at runtime.
pub fn validate(config: &TetherConfig) -> Result<(), ConfigError> {
    if config.dispatch.queue_warn_depth == 0 {
        return Err(ConfigError::ValidationError(
            "dispatch.queue_warn_depth must be at least 1".into(),
        ));
    }
    if config.logging.directive.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "logging.directive must not be empty".into(),
        ));
    }
    Ok(())
}
