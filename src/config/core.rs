use crate::formatting::ColorMode;
use crate::scan::ScanSettings;
use serde::Deserialize;
use std::time::Duration;

/// Root configuration structure, read from `.rezzonix.toml`
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Analysis backend connection settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How many records `history` asks for
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            history_limit: default_history_limit(),
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Timing of the simulated scan
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    #[serde(default = "default_max_increment")]
    pub max_increment: f64,

    #[serde(default = "default_completion_delay_ms")]
    pub completion_delay_ms: u64,

    /// Simulated BLE discovery time
    #[serde(default = "default_ble_discovery_ms")]
    pub ble_discovery_ms: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            max_increment: default_max_increment(),
            completion_delay_ms: default_completion_delay_ms(),
            ble_discovery_ms: default_ble_discovery_ms(),
        }
    }
}

impl ScanConfig {
    pub fn settings(&self) -> ScanSettings {
        ScanSettings {
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            max_increment: self.max_increment,
            completion_delay: Duration::from_millis(self.completion_delay_ms),
        }
    }

    pub fn ble_discovery(&self) -> Duration {
        Duration::from_millis(self.ble_discovery_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,
}

pub fn default_base_url() -> String {
    "http://localhost:8001".to_string()
}

pub fn default_timeout_secs() -> u64 {
    30
}

pub fn default_history_limit() -> usize {
    50
}

pub fn default_tick_interval_ms() -> u64 {
    300
}

pub fn default_max_increment() -> f64 {
    8.0
}

pub fn default_completion_delay_ms() -> u64 {
    1500
}

pub fn default_ble_discovery_ms() -> u64 {
    2000
}

impl AppConfig {
    /// Check value ranges. Returns every problem found, not just the first.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let url = self.service.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(format!(
                "service.base_url must start with http:// or https:// (got '{}')",
                url
            ));
        }
        if self.service.timeout_secs == 0 {
            errors.push("service.timeout_secs must be greater than 0".to_string());
        }
        if self.service.history_limit == 0 {
            errors.push("service.history_limit must be greater than 0".to_string());
        }
        if self.scan.tick_interval_ms == 0 {
            errors.push("scan.tick_interval_ms must be greater than 0".to_string());
        }
        if !(self.scan.max_increment > 0.0 && self.scan.max_increment <= 100.0) {
            errors.push(format!(
                "scan.max_increment must be in (0, 100] (got {})",
                self.scan.max_increment
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
