//! Publish-once slot for the host runtime handle.

use std::sync::OnceLock;

use tether_common::BridgeError;

use crate::host::RuntimeHandle;

/// Holds the normalized root handle for the life of the process.
///
/// Set at most once; every `get` after the publish observes the same handle,
/// from any thread, without locking.
pub struct RuntimeRegistry {
    slot: OnceLock<RuntimeHandle>,
}

impl RuntimeRegistry {
    pub(crate) fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Publish the handle. Returns `false` if a handle was already stored;
    /// the first publish always wins.
    pub(crate) fn publish(&self, handle: RuntimeHandle) -> bool {
        self.slot.set(handle).is_ok()
    }

    /// The stored handle, or `Uninitialized` before the first publish.
    pub fn get(&self) -> Result<RuntimeHandle, BridgeError> {
        self.slot.get().cloned().ok_or(BridgeError::Uninitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.slot.get().is_some()
    }
}
