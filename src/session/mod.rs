//! Session state, the step controller, and mock sensor pairing.

pub mod flow;
pub mod sensor;
pub mod state;

pub use flow::{parse_organ_keys, OrganSelection, SessionFlow, Step};
pub use sensor::{Device, DeviceScanner, MockDeviceScanner, SensorPairing};
pub use state::{Action, SessionState};
