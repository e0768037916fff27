//! Trait seams for the black-box host collaborators.
//!
//! The managed runtime, its UI toolkit, the sensor subsystem, and the
//! rendering engine are external. The bridge only ever touches them through
//! these traits: they deliver events on their own threads, accept
//! UI-affecting work only on the designated thread, and hand out accessor
//! objects whose construction the bridge merely triggers.

use std::fmt;
use std::sync::Arc;

use tether_common::{BridgeError, DeliveryRate, SensorKind, SensorSample, ToastDuration};

/// Root object of the managed host runtime.
///
/// The accessors return `SubsystemUnavailable` when the corresponding
/// service cannot be obtained; those failures surface synchronously to the
/// caller and are never retried by the bridge.
pub trait HostRuntime: Send + Sync {
    /// Capture a reference to the host execution environment itself (not
    /// just one handle into it). Invoked once, during `Bridge::init`.
    fn execution_env(&self) -> Result<Arc<dyn ExecutionEnv>, BridgeError>;

    /// Accessor for the UI toolkit service.
    fn toolkit(&self) -> Result<Arc<dyn UiToolkit>, BridgeError>;

    /// Accessor for the sensor subsystem service.
    fn sensor_service(&self) -> Result<Arc<dyn SensorService>, BridgeError>;
}

/// Normalized, long-lived form of the host root handle.
///
/// Publish-once: stored at most once per process by the registry, then
/// treated as immutable. Cheap to clone; all clones refer to the same root.
#[derive(Clone)]
pub struct RuntimeHandle(Arc<dyn HostRuntime>);

impl RuntimeHandle {
    pub fn new(root: Arc<dyn HostRuntime>) -> Self {
        Self(root)
    }

    pub fn host(&self) -> &dyn HostRuntime {
        self.0.as_ref()
    }

    /// Whether two handles refer to the same root object.
    pub fn same_root(&self, other: &RuntimeHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for RuntimeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RuntimeHandle").finish()
    }
}

/// The host execution environment's call convention.
///
/// Captured exactly once by the gateway; afterwards shared immutably so any
/// thread — including threads the host runtime never created — can attach
/// itself and originate calls into the runtime.
pub trait ExecutionEnv: Send + Sync {
    /// Attach the calling thread to the host call convention.
    ///
    /// The returned guard detaches the thread when dropped.
    fn attach_current_thread(&self) -> Result<AttachGuard, BridgeError>;
}

/// RAII guard for a thread attachment; runs its detach hook on drop.
pub struct AttachGuard {
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl AttachGuard {
    pub fn new(detach: impl FnOnce() + Send + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// Guard for environments where attachment needs no teardown.
    pub fn noop() -> Self {
        Self { detach: None }
    }
}

impl Drop for AttachGuard {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl fmt::Debug for AttachGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachGuard").finish()
    }
}

/// UI toolkit service. Both operations mutate UI state and therefore run
/// only inside tasks on the designated thread.
pub trait UiToolkit: Send + Sync {
    /// Display a transient notification.
    fn show_toast(&self, message: &str, duration: ToastDuration) -> Result<(), BridgeError>;

    /// Construct a new rendering surface.
    fn create_surface(&self) -> Result<Box<dyn RenderSurface>, BridgeError>;
}

/// Decides whether a requested navigation proceeds. `Send` because the
/// surface that stores it must itself be `Send` (see [`RenderSurface`]).
pub type NavigationHandler = Box<dyn Fn(&str) -> bool + Send>;

/// One rendering surface instance.
///
/// Constructed and used only inside tasks on the designated thread. The
/// `Send` bound exists so a not-yet-populated main loop can be handed to
/// that thread at boot; a live surface itself never moves again.
pub trait RenderSurface: Send {
    fn set_script_enabled(&mut self, enabled: bool);

    /// Install the navigation policy.
    fn set_navigation_handler(&mut self, handler: NavigationHandler);

    /// Install the command-injection bridge under `name`, exposing exactly
    /// the [`ContentCallbacks`] entry points to rendered content.
    fn install_callback_bridge(&mut self, name: &str, callbacks: Arc<dyn ContentCallbacks>);

    fn load_url(&mut self, url: &str) -> Result<(), BridgeError>;

    /// Evaluate `code` inside the surface, discarding any result.
    fn evaluate_script(&mut self, code: &str) -> Result<(), BridgeError>;
}

/// The fixed callback surface reachable from rendered content.
///
/// Exactly these two entry points — untrusted content never sees the rest of
/// the bridge. Both are fire-and-forget and may be invoked from arbitrary
/// engine threads, including before the surface-create task has run.
pub trait ContentCallbacks: Send + Sync {
    fn notify(&self, message: &str);
    fn log(&self, message: &str);
}

/// Opaque identifier for one sensor subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Sensor subsystem service.
pub trait SensorService: Send + Sync {
    fn subscribe(
        &self,
        kind: SensorKind,
        rate: DeliveryRate,
        listener: Arc<dyn SensorListener>,
    ) -> Result<SubscriptionId, BridgeError>;

    fn unsubscribe(&self, id: SubscriptionId);
}

/// Receives sensor events on the subsystem's own delivery thread.
pub trait SensorListener: Send + Sync {
    fn on_sample(&self, sample: SensorSample);

    /// Accuracy changes are delivered by the subsystem but carry no meaning
    /// for the snapshot cache; the default implementation drops them.
    fn on_accuracy_changed(&self, _accuracy: i32) {}
}
