use crate::core::analysis::timestamp;
use crate::core::SensorType;
use crate::session::SessionState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/analysis`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub patient_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_age: Option<u8>,
    pub selected_organs: Vec<String>,
    pub sensor_type: SensorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensor_name: Option<String>,
}

impl AnalysisRequest {
    /// Collect the fields accumulated by the session steps. An unpaired
    /// session is reported as BLE.
    pub fn from_session(state: &SessionState) -> Self {
        Self {
            patient_name: state.patient.name.clone(),
            patient_age: state.patient.age,
            selected_organs: state.selected_organs.clone(),
            sensor_type: state.sensor_type.unwrap_or_default(),
            sensor_name: state.sensor_name.clone(),
        }
    }
}

/// Body of `POST /api/patients`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Gender, Patient};
    use crate::session::Action;

    #[test]
    fn test_request_from_session_omits_unset_fields() {
        let mut state = SessionState::new();
        state.apply(Action::SetPatient(Patient {
            name: "Ali".into(),
            age: None,
            gender: Some(Gender::Male),
        }));
        state.apply(Action::SetOrgans(vec!["Kalp".into(), "Beyin".into()]));

        let request = AnalysisRequest::from_session(&state);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "patient_name": "Ali",
                "selected_organs": ["Kalp", "Beyin"],
                "sensor_type": "BLE"
            })
        );
    }
}
