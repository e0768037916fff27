//! Default callback bridge for rendered content.

use std::sync::Arc;

use tether_bridge::{Bridge, ContentCallbacks, ToastFacade};
use tether_common::ToastDuration;
use tracing::{info, warn};

/// Forwards the two content entry points into the bridge: `notify` becomes
/// a toast, `log` goes to the logging sink. Both are fire-and-forget and
/// tolerate arriving before the surface-create task has run.
pub struct BridgeContentCallbacks {
    toasts: ToastFacade,
}

impl BridgeContentCallbacks {
    pub fn new(bridge: Arc<Bridge>) -> Self {
        Self {
            toasts: ToastFacade::new(bridge),
        }
    }
}

impl ContentCallbacks for BridgeContentCallbacks {
    fn notify(&self, message: &str) {
        // Content notifications always use the short duration.
        if let Err(e) = self.toasts.show(message, ToastDuration::Short) {
            warn!(error = %e, "content notify dropped");
        }
    }

    fn log(&self, message: &str) {
        info!(target: "tether::content", %message);
    }
}
