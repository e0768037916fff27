//! Config file discovery and loading.
//!
//! Two loading modes. [`load_from_path`] is strict and propagates every
//! problem, for explicit `--config` overrides where the caller wants to
//! hear about mistakes. [`load_default`] is the lenient boot path: it seeds
//! a commented template on first run and falls back to defaults with a
//! warning instead of stopping the bridge over a bad knob.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tether_common::ConfigError;
use tracing::{info, warn};

use crate::schema::{self, TetherConfig};

/// Written on first run so users have something to edit.
const DEFAULT_TEMPLATE: &str = r#"# Tether bridge configuration.

[dispatch]
# Queue depth at which posting a main-thread task starts warning that the
# designated thread is falling behind.
queue_warn_depth = 64

[sensors]
# Delivery-rate hint passed to the sensor subsystem: "normal" or "fast".
rate = "normal"

[logging]
# Env-filter directive used when RUST_LOG is unset.
directive = "tether=info"
"#;

/// Strict load from an explicit path: read, parse, validate. Every failure
/// propagates to the caller.
pub fn load_from_path(path: &Path) -> Result<TetherConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            ConfigError::FileNotFound(path.to_path_buf())
        } else {
            ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
        }
    })?;

    let config: TetherConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;
    schema::validate(&config)?;
    Ok(config)
}

/// Lenient load from the platform default path.
///
/// Seeds [`DEFAULT_TEMPLATE`] when no file exists yet. An existing file
/// that fails to load is logged and ignored; boot continues on defaults.
pub fn load_default() -> Result<TetherConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config at {}, seeding default template", path.display());
        write_default_template(&path)?;
        return Ok(TetherConfig::default());
    }

    match load_from_path(&path) {
        Ok(config) => {
            info!("loaded config from {}", path.display());
            Ok(config)
        }
        Err(e) => {
            warn!("ignoring config at {}: {e}", path.display());
            Ok(TetherConfig::default())
        }
    }
}

/// The platform-specific default config file path.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("tether").join("config.toml"))
}

/// Seed `path` with the commented default template.
pub fn write_default_template(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }
    std::fs::write(path, DEFAULT_TEMPLATE)
        .map_err(|e| ConfigError::ParseError(format!("failed to write {}: {e}", path.display())))
}
