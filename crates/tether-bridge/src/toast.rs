//! Transient-notification façade.

use std::sync::Arc;

use tether_common::{BridgeError, ToastDuration};
use tracing::warn;

use crate::bridge::Bridge;

/// Translates foreign-originated toast commands into main-thread tasks
/// against the UI toolkit.
pub struct ToastFacade {
    bridge: Arc<Bridge>,
}

impl ToastFacade {
    pub fn new(bridge: Arc<Bridge>) -> Self {
        Self { bridge }
    }

    /// Post exactly one task that displays `message` for `duration`.
    ///
    /// The pre-init check fails synchronously on the calling thread;
    /// everything after that is fire-and-forget — a toolkit failure inside
    /// the posted task is logged and swallowed.
    pub fn show(&self, message: &str, duration: ToastDuration) -> Result<(), BridgeError> {
        self.bridge.context()?;
        let dispatcher = self.bridge.dispatcher()?;

        let message = message.to_owned();
        dispatcher.post(move |ctx| {
            if let Err(e) = ctx.toolkit().show_toast(&message, duration) {
                warn!(error = %e, "toast display failed");
            }
        });
        Ok(())
    }
}
