//! The bridge context object: owns every process-wide slot explicitly.

use std::sync::{Arc, Mutex, OnceLock};

use tether_common::BridgeError;
use tracing::{info, warn};

use crate::dispatch::{Dispatcher, MainLoop, DEFAULT_QUEUE_WARN_DEPTH};
use crate::gateway::Gateway;
use crate::host::{AttachGuard, HostRuntime, RuntimeHandle};
use crate::registry::RuntimeRegistry;

/// Tuning knobs applied at `init` time.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Dispatch queue depth at which `post` starts warning.
    pub queue_warn_depth: usize,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            queue_warn_depth: DEFAULT_QUEUE_WARN_DEPTH,
        }
    }
}

/// Owns the runtime-handle registry, the call gateway, and the dispatcher.
///
/// Initialization order inside [`Bridge::init`]:
/// 1. capture the execution environment (gateway),
/// 2. obtain the UI toolkit accessor from the root handle,
/// 3. build the dispatch queue and its main loop,
/// 4. publish the runtime handle — the step that makes every other entry
///    point start succeeding.
///
/// A failure at any step leaves the bridge uninitialized: dependent entry
/// points keep failing with [`BridgeError::Uninitialized`] instead of
/// crashing.
pub struct Bridge {
    registry: RuntimeRegistry,
    gateway: Gateway,
    dispatcher: OnceLock<Dispatcher>,
    init_lock: Mutex<()>,
}

impl Bridge {
    pub fn new() -> Self {
        Self {
            registry: RuntimeRegistry::new(),
            gateway: Gateway::new(),
            dispatcher: OnceLock::new(),
            init_lock: Mutex::new(()),
        }
    }

    /// Boot entry point. Must be called exactly once, from the host
    /// runtime's designated thread, before any other entry point.
    ///
    /// Returns the [`MainLoop`] the host must drive on that same thread, or
    /// `None` when this was a duplicate call (duplicates are a logged
    /// no-op; the first handle stays published).
    pub fn init(&self, root: Arc<dyn HostRuntime>) -> Result<Option<MainLoop>, BridgeError> {
        self.init_with(root, InitOptions::default())
    }

    /// [`Bridge::init`] with explicit tuning knobs.
    pub fn init_with(
        &self,
        root: Arc<dyn HostRuntime>,
        options: InitOptions,
    ) -> Result<Option<MainLoop>, BridgeError> {
        let _serialized = self.init_lock.lock().unwrap();

        if self.registry.is_initialized() {
            warn!("duplicate Bridge::init ignored; keeping the first runtime handle");
            return Ok(None);
        }

        self.gateway.capture(root.as_ref())?;

        let handle = RuntimeHandle::new(root);
        let toolkit = handle.host().toolkit()?;

        let (dispatcher, main_loop) = MainLoop::new(toolkit, options.queue_warn_depth);
        let stored = self.dispatcher.set(dispatcher).is_ok();
        let published = self.registry.publish(handle);
        debug_assert!(stored && published, "init raced past its serialization");

        info!("bridge initialized");
        Ok(Some(main_loop))
    }

    /// The published runtime handle. Safe from any thread; fails with
    /// `Uninitialized` before the first successful `init`.
    pub fn context(&self) -> Result<RuntimeHandle, BridgeError> {
        self.registry.get()
    }

    /// A producer handle onto the main-thread dispatch queue.
    pub fn dispatcher(&self) -> Result<Dispatcher, BridgeError> {
        self.dispatcher
            .get()
            .cloned()
            .ok_or(BridgeError::Uninitialized)
    }

    /// Attach the calling foreign thread to the host call convention.
    ///
    /// Gated on the registry, not just on the gateway capture: `init` may
    /// capture the environment and then fail on a later step, and in that
    /// state every entry point other than `init` must still fail.
    pub fn attach_current_thread(&self) -> Result<AttachGuard, BridgeError> {
        self.registry.get()?;
        self.gateway.attach_current_thread()
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn is_initialized(&self) -> bool {
        self.registry.is_initialized()
    }
}

impl Default for Bridge {
    fn default() -> Self {
        Self::new()
    }
}
