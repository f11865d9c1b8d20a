//! In-memory state of one analysis session.
//!
//! All mutation goes through [`SessionState::apply`] with an explicit
//! [`Action`], so every change is visible in one place and easy to log.

use crate::core::{AnalysisRecord, Patient, SensorType};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub patient: Patient,
    /// Display names in selection order.
    pub selected_organs: Vec<String>,
    pub sensor_type: Option<SensorType>,
    pub sensor_name: Option<String>,
    pub current_analysis: Option<AnalysisRecord>,
    pub is_online: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            patient: Patient::default(),
            selected_organs: Vec::new(),
            sensor_type: None,
            sensor_name: None,
            current_analysis: None,
            is_online: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetPatient(Patient),
    SetOrgans(Vec<String>),
    SetSensor {
        sensor_type: SensorType,
        sensor_name: Option<String>,
    },
    SetAnalysis(Option<AnalysisRecord>),
    SetOnline(bool),
    Reset,
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Self::SetPatient(_) => "SET_PATIENT",
            Self::SetOrgans(_) => "SET_ORGANS",
            Self::SetSensor { .. } => "SET_SENSOR",
            Self::SetAnalysis(_) => "SET_ANALYSIS",
            Self::SetOnline(_) => "SET_ONLINE",
            Self::Reset => "RESET",
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, action: Action) {
        debug!(action = action.name(), "session action");
        match action {
            Action::SetPatient(patient) => self.patient = patient,
            Action::SetOrgans(organs) => self.selected_organs = organs,
            Action::SetSensor {
                sensor_type,
                sensor_name,
            } => {
                self.sensor_type = Some(sensor_type);
                self.sensor_name = sensor_name;
            }
            Action::SetAnalysis(analysis) => self.current_analysis = analysis,
            Action::SetOnline(online) => self.is_online = online,
            Action::Reset => *self = Self::default(),
        }
    }

    pub fn reset(&mut self) {
        self.apply(Action::Reset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Gender;

    #[test]
    fn test_initial_state() {
        let state = SessionState::new();
        assert!(state.patient.is_empty());
        assert!(state.selected_organs.is_empty());
        assert_eq!(state.sensor_type, None);
        assert_eq!(state.sensor_name, None);
        assert!(state.current_analysis.is_none());
        assert!(state.is_online);
    }

    #[test]
    fn test_reset_after_mutations_restores_initial_state() {
        let mut state = SessionState::new();
        state.apply(Action::SetPatient(Patient {
            name: "Ali".into(),
            age: Some(40),
            gender: Some(Gender::Male),
        }));
        state.apply(Action::SetOrgans(vec!["Kalp".into()]));
        state.apply(Action::SetSensor {
            sensor_type: SensorType::Usb,
            sensor_name: Some("USB OTG Sensor".into()),
        });
        state.apply(Action::SetOnline(false));

        state.reset();

        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn test_set_sensor_replaces_name() {
        let mut state = SessionState::new();
        state.apply(Action::SetSensor {
            sensor_type: SensorType::Ble,
            sensor_name: Some("RezzoniX Bio-Sensor X1".into()),
        });
        state.apply(Action::SetSensor {
            sensor_type: SensorType::Usb,
            sensor_name: None,
        });
        assert_eq!(state.sensor_type, Some(SensorType::Usb));
        assert_eq!(state.sensor_name, None);
    }
}
