use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Resonance frequency reported on every analysis, in Hz.
pub const DEFAULT_FREQUENCY_HZ: u32 = 528;

/// Stress level above which a result counts as a critical finding.
pub const CRITICAL_STRESS: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
pub enum SensorType {
    #[default]
    #[serde(rename = "BLE")]
    #[value(name = "ble")]
    Ble,
    #[serde(rename = "USB")]
    #[value(name = "usb")]
    Usb,
}

impl SensorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ble => "BLE",
            Self::Usb => "USB",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One organ line of an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganResult {
    pub organ: String,
    /// 0-100, higher means better balance.
    pub score: u8,
    /// 0-10, higher means more stress.
    pub stress: u8,
    pub note: String,
}

impl OrganResult {
    pub fn is_critical(&self) -> bool {
        self.stress > CRITICAL_STRESS
    }
}

/// Analysis record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: String,
    #[serde(default)]
    pub patient_id: String,
    pub patient_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_age: Option<u8>,
    pub selected_organs: Vec<String>,
    pub overall_score: u8,
    pub band: String,
    pub results: Vec<OrganResult>,
    pub sensor_type: SensorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_name: Option<String>,
    #[serde(default = "default_frequency")]
    pub frequency: u32,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

fn default_frequency() -> u32 {
    DEFAULT_FREQUENCY_HZ
}

impl AnalysisRecord {
    pub fn band_level(&self) -> BandLevel {
        BandLevel::classify(&self.band)
    }

    pub fn critical_results(&self) -> impl Iterator<Item = &OrganResult> {
        self.results.iter().filter(|r| r.is_critical())
    }
}

/// Display classification of the free-form band label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BandLevel {
    Balanced,
    Monitor,
    HighMonitor,
}

impl BandLevel {
    pub fn classify(band: &str) -> Self {
        match band.trim() {
            "Dengeli" | "Balanced" => Self::Balanced,
            "Takip" | "Monitor" => Self::Monitor,
            _ => Self::HighMonitor,
        }
    }
}

/// The backend stores naive UTC datetimes, so `created_at` may arrive with
/// or without an offset.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|e| format!("invalid timestamp '{}': {}", raw, e))
    }
}
