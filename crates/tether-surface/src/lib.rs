//! Rendering-surface façade.
//!
//! Translates foreign-originated surface commands (create, navigate, run
//! script) into main-thread dispatcher tasks, and exposes the fixed
//! two-method callback surface (`notify`, `log`) that rendered content may
//! call back through. The rendering engine itself is a black box behind
//! [`tether_bridge::RenderSurface`].

pub mod callbacks;
pub mod facade;
pub mod ipc;

pub use callbacks::BridgeContentCallbacks;
pub use facade::{SurfaceFacade, CALLBACK_BRIDGE_NAME};
pub use ipc::{dispatch_inbound, InboundMessage, InboundPayload, CONTENT_BOOTSTRAP_SCRIPT};
