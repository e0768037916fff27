//! Surface lifecycle and command façade.

use std::sync::Arc;

use tether_bridge::{Bridge, ContentCallbacks, Dispatcher};
use tether_common::BridgeError;
use tracing::{debug, warn};

use crate::callbacks::BridgeContentCallbacks;
use crate::ipc::CONTENT_BOOTSTRAP_SCRIPT;

/// Name under which the callback bridge is exposed to rendered content.
pub const CALLBACK_BRIDGE_NAME: &str = "host";

/// Foreign-facing handle for the rendering surface.
///
/// The surface itself lives in the designated thread's `MainContext` and
/// moves Absent → Created exactly once. Every operation here only posts a
/// task; commands against an absent surface are silently dropped inside the
/// task (best-effort contract, not an error).
pub struct SurfaceFacade {
    bridge: Arc<Bridge>,
    callbacks: Arc<dyn ContentCallbacks>,
}

impl SurfaceFacade {
    pub fn new(bridge: Arc<Bridge>) -> Self {
        let callbacks: Arc<dyn ContentCallbacks> =
            Arc::new(BridgeContentCallbacks::new(Arc::clone(&bridge)));
        Self { bridge, callbacks }
    }

    /// Replace the default callback bridge (notify → toast, log → tracing)
    /// with a custom one.
    pub fn with_callbacks(bridge: Arc<Bridge>, callbacks: Arc<dyn ContentCallbacks>) -> Self {
        Self { bridge, callbacks }
    }

    /// The callback surface handed to the rendering engine. Safe to invoke
    /// from arbitrary engine threads, even before the create task has run.
    pub fn callbacks(&self) -> Arc<dyn ContentCallbacks> {
        Arc::clone(&self.callbacks)
    }

    fn dispatcher(&self) -> Result<Dispatcher, BridgeError> {
        self.bridge.context()?;
        self.bridge.dispatcher()
    }

    /// Post the surface-construction task.
    ///
    /// The task constructs the surface only if it is still absent (so two
    /// racing `create` calls cannot construct twice), enables script
    /// execution, installs a pass-through navigation policy, and installs
    /// the content callback bridge.
    pub fn create(&self) -> Result<(), BridgeError> {
        let dispatcher = self.dispatcher()?;
        let callbacks = Arc::clone(&self.callbacks);
        dispatcher.post(move |ctx| {
            if ctx.has_surface() {
                debug!("surface already created");
                return;
            }
            let mut surface = match ctx.toolkit().create_surface() {
                Ok(surface) => surface,
                Err(e) => {
                    warn!(error = %e, "surface creation failed");
                    return;
                }
            };
            surface.set_script_enabled(true);
            surface.set_navigation_handler(Box::new(|_url| true));
            surface.install_callback_bridge(CALLBACK_BRIDGE_NAME, callbacks);
            if let Err(e) = surface.evaluate_script(CONTENT_BOOTSTRAP_SCRIPT) {
                warn!(error = %e, "content bootstrap script failed");
            }
            ctx.install_surface(surface);
            debug!("surface created");
        });
        Ok(())
    }

    /// Post a navigation task. Dropped silently if the surface is absent.
    pub fn load_url(&self, url: &str) -> Result<(), BridgeError> {
        let dispatcher = self.dispatcher()?;
        let url = url.to_owned();
        dispatcher.post(move |ctx| {
            let Some(surface) = ctx.surface_mut() else {
                debug!(%url, "load_url dropped: surface absent");
                return;
            };
            if let Err(e) = surface.load_url(&url) {
                warn!(error = %e, %url, "navigation failed");
            }
        });
        Ok(())
    }

    /// Post a script-evaluation task, discarding any result. Dropped
    /// silently if the surface is absent.
    pub fn run_script(&self, code: &str) -> Result<(), BridgeError> {
        let dispatcher = self.dispatcher()?;
        let code = code.to_owned();
        dispatcher.post(move |ctx| {
            let Some(surface) = ctx.surface_mut() else {
                debug!("run_script dropped: surface absent");
                return;
            };
            if let Err(e) = surface.evaluate_script(&code) {
                warn!(error = %e, "script evaluation failed");
            }
        });
        Ok(())
    }
}
