use serde::{Deserialize, Serialize};

/// One delivered motion-sensor reading: three floating-point axis values.
///
/// Always a wholesale snapshot of the latest event; there is no merging of
/// old and new readings anywhere in the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample(pub [f32; 3]);

impl SensorSample {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self([x, y, z])
    }

    pub fn x(&self) -> f32 {
        self.0[0]
    }

    pub fn y(&self) -> f32 {
        self.0[1]
    }

    pub fn z(&self) -> f32 {
        self.0[2]
    }

    /// The raw axis values in delivery order.
    pub fn axes(&self) -> [f32; 3] {
        self.0
    }
}

impl From<[f32; 3]> for SensorSample {
    fn from(axes: [f32; 3]) -> Self {
        Self(axes)
    }
}

/// How long a transient notification stays on screen.
///
/// Opaque enumerants; the concrete on-screen durations belong to the UI
/// toolkit and are not defined here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastDuration {
    Short,
    Long,
}

/// The sensor kinds the bridge knows how to subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    Accelerometer,
}

/// Delivery-rate hint passed to the sensor subsystem on subscription.
/// A hint only — the subsystem gives no real-time guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryRate {
    #[default]
    Normal,
    Fast,
}
