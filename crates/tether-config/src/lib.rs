//! Bridge configuration.
//!
//! TOML-based, with `serde(default)` on every section so partial configs
//! work out of the box. The default-path load is lenient (bad configs are
//! logged and replaced with defaults); loading an explicit path is strict.

pub mod loader;
pub mod schema;

pub use loader::{default_config_path, load_default, load_from_path, write_default_template};
pub use schema::TetherConfig;

use tether_common::ConfigError;

/// Load config from the platform default path, creating a default file if
/// none exists.
pub fn load_config() -> Result<TetherConfig, ConfigError> {
    loader::load_default()
}
