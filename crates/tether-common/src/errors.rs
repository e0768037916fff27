use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Errors surfaced synchronously at the bridge boundary.
///
/// Failures inside a posted task never reach the caller; they are logged and
/// swallowed on the designated thread (fire-and-forget contract).
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// An entry point that needs the runtime handle was called before
    /// `Bridge::init` completed successfully.
    #[error("bridge not initialized: call Bridge::init from the designated thread first")]
    Uninitialized,

    /// A required external subsystem could not be obtained at construction
    /// time (sensor service, UI toolkit).
    #[error("subsystem unavailable: {0}")]
    SubsystemUnavailable(String),

    /// The execution-environment capture failed during `init`. Dependent
    /// entry points subsequently fail with [`BridgeError::Uninitialized`].
    #[error("execution environment capture failed: {0}")]
    GatewayCapture(String),

    /// The UI toolkit rejected an operation. Only visible to code running on
    /// the designated thread; never crosses back to a foreign caller.
    #[error("toolkit error: {0}")]
    Toolkit(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
