//! One-time capture of the host execution environment.

use std::sync::{Arc, OnceLock};

use tether_common::BridgeError;
use tracing::debug;

use crate::host::{AttachGuard, ExecutionEnv, HostRuntime};

/// Cross-runtime call gateway.
///
/// Captures a reference to the execution environment itself during `init`,
/// so that threads the host runtime never created can later attach and
/// originate calls into it. The capture is guarded: only the first attempt
/// has effect, repeat attempts are no-ops.
pub struct Gateway {
    env: OnceLock<Arc<dyn ExecutionEnv>>,
}

impl Gateway {
    pub(crate) fn new() -> Self {
        Self {
            env: OnceLock::new(),
        }
    }

    /// Capture the environment from the root handle. Idempotent; a capture
    /// failure leaves the gateway (and the whole bridge) uninitialized.
    pub(crate) fn capture(&self, root: &dyn HostRuntime) -> Result<(), BridgeError> {
        if self.env.get().is_some() {
            debug!("execution environment already captured");
            return Ok(());
        }
        let env = root.execution_env()?;
        // A lost publish race means another capture finished first; that
        // instance stays.
        let _ = self.env.set(env);
        Ok(())
    }

    pub fn is_captured(&self) -> bool {
        self.env.get().is_some()
    }

    /// Attach the calling thread to the host call convention. Fails with
    /// `Uninitialized` before a successful capture.
    ///
    /// Crate-private: callers go through `Bridge::attach_current_thread`,
    /// which additionally requires the whole bridge to be initialized. A
    /// capture that succeeded inside a failed `init` must not leave a live
    /// entry point behind.
    pub(crate) fn attach_current_thread(&self) -> Result<AttachGuard, BridgeError> {
        let env = self.env.get().ok_or(BridgeError::Uninitialized)?;
        env.attach_current_thread()
    }
}
