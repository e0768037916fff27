//! Core of the host-runtime interop bridge.
//!
//! Provides:
//! - The [`Bridge`] context object: publish-once runtime handle plus the
//!   one-time execution-environment capture
//! - The main-thread dispatcher: FIFO, fire-and-forget task hand-off onto
//!   the host's single designated UI thread
//! - The sensor snapshot cache: last-writer-wins slot over the sensor
//!   subsystem's delivery thread
//! - The toast façade for transient notifications
//!
//! External collaborators (UI toolkit, sensor subsystem, rendering engine)
//! are black boxes behind the traits in [`host`].

pub mod bridge;
pub mod dispatch;
pub mod gateway;
pub mod host;
pub mod registry;
pub mod sensors;
pub mod toast;

pub use bridge::{Bridge, InitOptions};
pub use dispatch::{Dispatcher, MainContext, MainLoop};
pub use gateway::Gateway;
pub use host::{
    AttachGuard, ContentCallbacks, ExecutionEnv, HostRuntime, NavigationHandler, RenderSurface,
    RuntimeHandle, SensorListener, SensorService, SubscriptionId, UiToolkit,
};
pub use registry::RuntimeRegistry;
pub use sensors::SensorCache;
pub use toast::ToastFacade;

#[cfg(test)]
pub(crate) mod testhost;
