//! In-memory host collaborators for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::ThreadId;

use tether_common::{BridgeError, DeliveryRate, SensorKind, SensorSample, ToastDuration};

use crate::host::{
    AttachGuard, ContentCallbacks, ExecutionEnv, HostRuntime, NavigationHandler, RenderSurface,
    SensorListener, SensorService, SubscriptionId, UiToolkit,
};

/// A toast the mock toolkit was asked to display.
pub(crate) struct ShownToast {
    pub message: String,
    pub duration: ToastDuration,
    pub thread: ThreadId,
}

pub(crate) struct MockToolkit {
    pub toasts: Mutex<Vec<ShownToast>>,
    fail_toasts: bool,
}

impl MockToolkit {
    pub fn new() -> Self {
        Self {
            toasts: Mutex::new(Vec::new()),
            fail_toasts: false,
        }
    }

    fn failing() -> Self {
        Self {
            toasts: Mutex::new(Vec::new()),
            fail_toasts: true,
        }
    }
}

impl UiToolkit for MockToolkit {
    fn show_toast(&self, message: &str, duration: ToastDuration) -> Result<(), BridgeError> {
        if self.fail_toasts {
            return Err(BridgeError::Toolkit("toast rejected".into()));
        }
        self.toasts.lock().unwrap().push(ShownToast {
            message: message.to_owned(),
            duration,
            thread: std::thread::current().id(),
        });
        Ok(())
    }

    fn create_surface(&self) -> Result<Box<dyn RenderSurface>, BridgeError> {
        Ok(Box::new(MockSurface::default()))
    }
}

#[derive(Default)]
pub(crate) struct MockSurface {
    nav_policy: Option<NavigationHandler>,
}

impl RenderSurface for MockSurface {
    fn set_script_enabled(&mut self, _enabled: bool) {}

    fn set_navigation_handler(&mut self, handler: NavigationHandler) {
        self.nav_policy = Some(handler);
    }

    fn install_callback_bridge(&mut self, _name: &str, _callbacks: Arc<dyn ContentCallbacks>) {}

    fn load_url(&mut self, url: &str) -> Result<(), BridgeError> {
        let _allowed = self.nav_policy.as_ref().map_or(true, |policy| policy(url));
        Ok(())
    }

    fn evaluate_script(&mut self, _code: &str) -> Result<(), BridgeError> {
        Ok(())
    }
}

pub(crate) struct MockEnv {
    pub captures: AtomicUsize,
    pub attached: Arc<AtomicUsize>,
}

impl MockEnv {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            captures: AtomicUsize::new(0),
            attached: Arc::new(AtomicUsize::new(0)),
        })
    }
}

impl ExecutionEnv for MockEnv {
    fn attach_current_thread(&self) -> Result<AttachGuard, BridgeError> {
        self.attached.fetch_add(1, Ordering::SeqCst);
        let attached = Arc::clone(&self.attached);
        Ok(AttachGuard::new(move || {
            attached.fetch_sub(1, Ordering::SeqCst);
        }))
    }
}

pub(crate) struct MockSensorService {
    listeners: Mutex<HashMap<u64, Arc<dyn SensorListener>>>,
    next_id: AtomicU64,
}

impl MockSensorService {
    fn new() -> Self {
        Self {
            listeners: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Push a sample to every live subscriber, like a delivery thread would.
    pub fn deliver(&self, sample: SensorSample) {
        for listener in self.listeners.lock().unwrap().values() {
            listener.on_sample(sample);
        }
    }

    pub fn active_subscriptions(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }
}

impl SensorService for MockSensorService {
    fn subscribe(
        &self,
        _kind: SensorKind,
        _rate: DeliveryRate,
        listener: Arc<dyn SensorListener>,
    ) -> Result<SubscriptionId, BridgeError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.listeners.lock().unwrap().insert(id, listener);
        Ok(SubscriptionId(id))
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.lock().unwrap().remove(&id.0);
    }
}

pub(crate) struct MockHost {
    pub env: Arc<MockEnv>,
    pub toolkit: Arc<MockToolkit>,
    pub sensors: Arc<MockSensorService>,
    fail_env: bool,
    fail_toolkit: bool,
    fail_sensors: bool,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            env: MockEnv::new(),
            toolkit: Arc::new(MockToolkit::new()),
            sensors: Arc::new(MockSensorService::new()),
            fail_env: false,
            fail_toolkit: false,
            fail_sensors: false,
        }
    }

    pub fn failing_env() -> Self {
        Self {
            fail_env: true,
            ..Self::new()
        }
    }

    pub fn failing_toolkit() -> Self {
        Self {
            fail_toolkit: true,
            ..Self::new()
        }
    }

    pub fn failing_sensors() -> Self {
        Self {
            fail_sensors: true,
            ..Self::new()
        }
    }

    pub fn with_failing_toasts() -> Self {
        Self {
            toolkit: Arc::new(MockToolkit::failing()),
            ..Self::new()
        }
    }
}

impl HostRuntime for MockHost {
    fn execution_env(&self) -> Result<Arc<dyn ExecutionEnv>, BridgeError> {
        if self.fail_env {
            return Err(BridgeError::GatewayCapture("environment unavailable".into()));
        }
        self.env.captures.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::clone(&self.env) as _)
    }

    fn toolkit(&self) -> Result<Arc<dyn UiToolkit>, BridgeError> {
        if self.fail_toolkit {
            return Err(BridgeError::SubsystemUnavailable("ui toolkit".into()));
        }
        Ok(Arc::clone(&self.toolkit) as _)
    }

    fn sensor_service(&self) -> Result<Arc<dyn SensorService>, BridgeError> {
        if self.fail_sensors {
            return Err(BridgeError::SubsystemUnavailable("sensor service".into()));
        }
        Ok(Arc::clone(&self.sensors) as _)
    }
}
