//! Snapshot cache over the sensor subsystem.

use std::sync::{Arc, Mutex};

use tether_common::{BridgeError, DeliveryRate, SensorKind, SensorSample};
use tracing::debug;

use crate::bridge::Bridge;
use crate::host::{SensorListener, SensorService, SubscriptionId};

/// The single shared slot. Wholesale replace, last-writer-wins; readers
/// never block on anything longer than the slot lock itself.
#[derive(Default)]
struct SampleSlot {
    latest: Mutex<Option<SensorSample>>,
}

impl SensorListener for SampleSlot {
    fn on_sample(&self, sample: SensorSample) {
        *self.latest.lock().unwrap() = Some(sample);
    }
    // on_accuracy_changed: default empty handler; accuracy is ignored.
}

/// Subscribes to one sensor kind on construction and caches the most recent
/// reading for non-blocking reads from any thread.
pub struct SensorCache {
    service: Arc<dyn SensorService>,
    slot: Arc<SampleSlot>,
    subscription: Mutex<Option<SubscriptionId>>,
}

impl SensorCache {
    /// Subscribe for `kind` at `rate`. Fails with `Uninitialized` before
    /// `Bridge::init`, or `SubsystemUnavailable` when the sensor service
    /// cannot be obtained.
    pub fn new(bridge: &Bridge, kind: SensorKind, rate: DeliveryRate) -> Result<Self, BridgeError> {
        let handle = bridge.context()?;
        let service = handle.host().sensor_service()?;

        let slot = Arc::new(SampleSlot::default());
        let listener: Arc<dyn SensorListener> = Arc::clone(&slot) as _;
        let id = service.subscribe(kind, rate, listener)?;
        debug!(?kind, ?rate, "sensor subscription started");

        Ok(Self {
            service,
            slot,
            subscription: Mutex::new(Some(id)),
        })
    }

    /// Accelerometer subscription at the subsystem's normal delivery rate.
    pub fn accelerometer(bridge: &Bridge) -> Result<Self, BridgeError> {
        Self::new(bridge, SensorKind::Accelerometer, DeliveryRate::Normal)
    }

    /// The most recent cached reading, or `None` before the first delivery.
    /// Safe to call concurrently with event delivery.
    pub fn read(&self) -> Option<SensorSample> {
        *self.slot.latest.lock().unwrap()
    }

    /// Unsubscribe from further deliveries. The last cached reading stays
    /// readable; stopping only halts updates. Idempotent.
    pub fn stop(&self) {
        if let Some(id) = self.subscription.lock().unwrap().take() {
            self.service.unsubscribe(id);
            debug!("sensor subscription stopped");
        }
    }
}

impl std::fmt::Debug for SensorCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensorCache").finish_non_exhaustive()
    }
}

impl Drop for SensorCache {
    fn drop(&mut self) {
        self.stop();
    }
}
