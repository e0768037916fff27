//! A simulated host runtime so the demo binary runs end to end without a
//! real managed runtime behind it.
//!
//! The toolkit logs toasts instead of drawing them, the surface logs
//! navigations and scripts, and the sensor service runs a small producer
//! thread that synthesizes accelerometer readings.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tether_bridge::{
    AttachGuard, ContentCallbacks, ExecutionEnv, HostRuntime, NavigationHandler, RenderSurface,
    SensorListener, SensorService, SubscriptionId, UiToolkit,
};
use tether_common::{BridgeError, DeliveryRate, SensorKind, SensorSample, ToastDuration};
use tracing::{debug, info};

pub struct SimHost {
    env: Arc<SimEnv>,
    toolkit: Arc<SimToolkit>,
    sensors: Arc<SimSensorService>,
}

impl SimHost {
    pub fn new() -> Self {
        Self {
            env: Arc::new(SimEnv),
            toolkit: Arc::new(SimToolkit),
            sensors: Arc::new(SimSensorService::new()),
        }
    }
}

impl HostRuntime for SimHost {
    fn execution_env(&self) -> Result<Arc<dyn ExecutionEnv>, BridgeError> {
        Ok(Arc::clone(&self.env) as _)
    }

    fn toolkit(&self) -> Result<Arc<dyn UiToolkit>, BridgeError> {
        Ok(Arc::clone(&self.toolkit) as _)
    }

    fn sensor_service(&self) -> Result<Arc<dyn SensorService>, BridgeError> {
        Ok(Arc::clone(&self.sensors) as _)
    }
}

struct SimEnv;

impl ExecutionEnv for SimEnv {
    fn attach_current_thread(&self) -> Result<AttachGuard, BridgeError> {
        debug!(thread = ?std::thread::current().id(), "foreign thread attached");
        Ok(AttachGuard::new(|| debug!("foreign thread detached")))
    }
}

struct SimToolkit;

impl UiToolkit for SimToolkit {
    fn show_toast(&self, message: &str, duration: ToastDuration) -> Result<(), BridgeError> {
        info!(%message, ?duration, "toast");
        Ok(())
    }

    fn create_surface(&self) -> Result<Box<dyn RenderSurface>, BridgeError> {
        info!("surface created");
        Ok(Box::new(SimSurface { nav_policy: None }))
    }
}

struct SimSurface {
    nav_policy: Option<NavigationHandler>,
}

impl RenderSurface for SimSurface {
    fn set_script_enabled(&mut self, enabled: bool) {
        debug!(enabled, "script execution toggled");
    }

    fn set_navigation_handler(&mut self, handler: NavigationHandler) {
        debug!("navigation handler installed");
        self.nav_policy = Some(handler);
    }

    fn install_callback_bridge(&mut self, name: &str, _callbacks: Arc<dyn ContentCallbacks>) {
        debug!(name, "callback bridge installed");
    }

    fn load_url(&mut self, url: &str) -> Result<(), BridgeError> {
        if !self.nav_policy.as_ref().map_or(true, |policy| policy(url)) {
            info!(%url, "navigation blocked by policy");
            return Ok(());
        }
        info!(%url, "surface navigating");
        Ok(())
    }

    fn evaluate_script(&mut self, code: &str) -> Result<(), BridgeError> {
        info!(code, "surface evaluating script");
        Ok(())
    }
}

/// Synthesizes accelerometer readings on a background delivery thread,
/// roughly gravity on Z with a small wobble on X.
struct SimSensorService {
    next_id: AtomicU64,
    running: Mutex<HashMap<u64, Arc<AtomicBool>>>,
}

impl SimSensorService {
    fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            running: Mutex::new(HashMap::new()),
        }
    }
}

impl SensorService for SimSensorService {
    fn subscribe(
        &self,
        kind: SensorKind,
        rate: DeliveryRate,
        listener: Arc<dyn SensorListener>,
    ) -> Result<SubscriptionId, BridgeError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let running = Arc::new(AtomicBool::new(true));
        self.running
            .lock()
            .unwrap()
            .insert(id, Arc::clone(&running));

        let interval = match rate {
            DeliveryRate::Normal => Duration::from_millis(66),
            DeliveryRate::Fast => Duration::from_millis(20),
        };
        debug!(?kind, ?rate, "sensor producer starting");

        std::thread::spawn(move || {
            let mut tick = 0u32;
            while running.load(Ordering::SeqCst) {
                let wobble = (tick as f32 * 0.3).sin() * 0.2;
                listener.on_sample(SensorSample::new(wobble, 0.0, 9.81 - wobble / 2.0));
                tick = tick.wrapping_add(1);
                std::thread::sleep(interval);
            }
        });

        Ok(SubscriptionId(id))
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        if let Some(flag) = self.running.lock().unwrap().remove(&id.0) {
            flag.store(false, Ordering::SeqCst);
            debug!(id = id.0, "sensor producer stopping");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingListener {
        samples: Mutex<Vec<SensorSample>>,
    }

    impl SensorListener for CountingListener {
        fn on_sample(&self, sample: SensorSample) {
            self.samples.lock().unwrap().push(sample);
        }
    }

    #[test]
    fn producer_delivers_until_unsubscribed() {
        let service = SimSensorService::new();
        let listener = Arc::new(CountingListener {
            samples: Mutex::new(Vec::new()),
        });

        let id = service
            .subscribe(
                SensorKind::Accelerometer,
                DeliveryRate::Fast,
                Arc::clone(&listener) as _,
            )
            .unwrap();

        std::thread::sleep(Duration::from_millis(100));
        service.unsubscribe(id);
        let delivered = listener.samples.lock().unwrap().len();
        assert!(delivered > 0);

        std::thread::sleep(Duration::from_millis(100));
        assert!(listener.samples.lock().unwrap().len() <= delivered + 1);
    }
}
