//! Mock sensor discovery and the pairing step's local state.
//!
//! There is no BLE or USB stack behind this; discovery returns fixed
//! device lists. Tests inject their own [`DeviceScanner`].

use crate::core::SensorType;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub id: String,
    pub name: String,
}

impl Device {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

pub trait DeviceScanner {
    fn discover(&self, sensor_type: SensorType) -> Vec<Device>;
}

/// Simulated devices: three BLE scanners and a single USB OTG sensor.
#[derive(Debug, Clone)]
pub struct MockDeviceScanner {
    ble: Vec<Device>,
    usb: Vec<Device>,
}

impl Default for MockDeviceScanner {
    fn default() -> Self {
        Self {
            ble: vec![
                Device::new("1", "RezzoniX Bio-Sensor X1"),
                Device::new("2", "RezzoniX Pro Scanner"),
                Device::new("3", "RezzoniX Analyzer V2"),
            ],
            usb: vec![Device::new("usb1", "USB OTG Sensor")],
        }
    }
}

impl MockDeviceScanner {
    pub fn with_devices(ble: Vec<Device>, usb: Vec<Device>) -> Self {
        Self { ble, usb }
    }

    /// A scanner that never finds anything.
    pub fn empty() -> Self {
        Self::with_devices(Vec::new(), Vec::new())
    }
}

impl DeviceScanner for MockDeviceScanner {
    fn discover(&self, sensor_type: SensorType) -> Vec<Device> {
        match sensor_type {
            SensorType::Ble => self.ble.clone(),
            SensorType::Usb => self.usb.clone(),
        }
    }
}

/// Local state of the sensor step before it is submitted.
#[derive(Debug, Clone, Default)]
pub struct SensorPairing {
    sensor_type: Option<SensorType>,
    devices: Vec<Device>,
    selected: Option<Device>,
}

impl SensorPairing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switching type drops any discovered devices and the current choice.
    pub fn select_type(&mut self, sensor_type: SensorType) {
        self.sensor_type = Some(sensor_type);
        self.devices.clear();
        self.selected = None;
    }

    pub fn scan<S: DeviceScanner>(&mut self, scanner: &S) -> &[Device] {
        self.selected = None;
        self.devices = match self.sensor_type {
            Some(sensor_type) => scanner.discover(sensor_type),
            None => Vec::new(),
        };
        &self.devices
    }

    /// Pick a discovered device by id, exact name (case insensitive) or
    /// 1-based position. Returns `None` and clears the choice if nothing
    /// matches.
    pub fn select_device(&mut self, query: &str) -> Option<&Device> {
        let query = query.trim();
        let by_id_or_name = self
            .devices
            .iter()
            .find(|d| d.id == query || d.name.eq_ignore_ascii_case(query));
        let found = by_id_or_name.or_else(|| {
            query
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|idx| self.devices.get(idx))
        });
        self.selected = found.cloned();
        self.selected.as_ref()
    }

    pub fn sensor_type(&self) -> Option<SensorType> {
        self.sensor_type
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn selected(&self) -> Option<&Device> {
        self.selected.as_ref()
    }
}
