pub mod errors;
pub mod types;

pub use errors::{BridgeError, ConfigError};
pub use types::{DeliveryRate, SensorKind, SensorSample, ToastDuration};

pub type Result<T> = std::result::Result<T, BridgeError>;
