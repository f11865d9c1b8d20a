//! Step-by-step session controller.
//!
//! Each `submit_*` validates its input first; on failure nothing in the
//! session changes and the step stays where it is. Going back never
//! revalidates earlier steps; re-submitting a step overwrites only that
//! step's values.

use super::sensor::Device;
use super::state::{Action, SessionState};
use crate::core::{parse_age, AnalysisRecord, Gender, Language, OrganKey, Patient, SensorType, ValidationError};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Step {
    Patient,
    Organs,
    Sensor,
    Scan,
    Results,
}

impl Step {
    pub fn previous(self) -> Self {
        match self {
            Self::Patient | Self::Organs => Self::Patient,
            Self::Sensor => Self::Organs,
            Self::Scan => Self::Sensor,
            Self::Results => Self::Scan,
        }
    }
}

/// Toggle set of organ keys that remembers selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganSelection {
    keys: Vec<OrganKey>,
}

impl OrganSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pre-ticked selection shown when the step opens.
    pub fn with_defaults() -> Self {
        Self {
            keys: crate::core::DEFAULT_SELECTION.to_vec(),
        }
    }

    /// Build a selection from keys in order, ignoring repeats.
    pub fn from_keys<I: IntoIterator<Item = OrganKey>>(keys: I) -> Self {
        let mut selection = Self::new();
        for key in keys {
            selection.insert(key);
        }
        selection
    }

    /// Flip `key` in or out. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, key: OrganKey) -> bool {
        if let Some(pos) = self.keys.iter().position(|k| *k == key) {
            self.keys.remove(pos);
            false
        } else {
            self.keys.push(key);
            true
        }
    }

    pub fn insert(&mut self, key: OrganKey) {
        if !self.contains(key) {
            self.keys.push(key);
        }
    }

    pub fn contains(&self, key: OrganKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn keys(&self) -> &[OrganKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Parse a list of organ keys as typed on the command line.
pub fn parse_organ_keys<S: AsRef<str>>(raw: &[S]) -> Result<OrganSelection, ValidationError> {
    let mut selection = OrganSelection::new();
    for key in raw {
        let key = key.as_ref();
        let organ =
            OrganKey::from_key(key).ok_or_else(|| ValidationError::UnknownOrgan(key.trim().to_string()))?;
        selection.insert(organ);
    }
    Ok(selection)
}

#[derive(Debug, Clone)]
pub struct SessionFlow {
    state: SessionState,
    step: Step,
    language: Language,
}

impl SessionFlow {
    pub fn new(language: Language) -> Self {
        Self {
            state: SessionState::new(),
            step: Step::Patient,
            language,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn submit_patient(
        &mut self,
        name: &str,
        age_text: &str,
        gender: Option<Gender>,
    ) -> Result<(), ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        let gender = gender.ok_or(ValidationError::GenderRequired)?;
        let age = parse_age(age_text)?;

        self.state.apply(Action::SetPatient(Patient {
            name: name.to_string(),
            age,
            gender: Some(gender),
        }));
        self.step = Step::Organs;
        Ok(())
    }

    pub fn submit_organ_selection(&mut self, selection: &OrganSelection) -> Result<(), ValidationError> {
        if selection.is_empty() {
            return Err(ValidationError::NoOrgansSelected);
        }
        let names = selection
            .keys()
            .iter()
            .map(|key| key.display_name(self.language).to_string())
            .collect();

        self.state.apply(Action::SetOrgans(names));
        self.step = Step::Sensor;
        Ok(())
    }

    pub fn submit_sensor_choice(
        &mut self,
        sensor_type: SensorType,
        device: Option<&Device>,
    ) -> Result<(), ValidationError> {
        let device = device.ok_or(ValidationError::NoDeviceSelected)?;

        self.state.apply(Action::SetSensor {
            sensor_type,
            sensor_name: Some(device.name.clone()),
        });
        self.step = Step::Scan;
        info!(sensor = %sensor_type, device = %device.name, "sensor paired");
        Ok(())
    }

    pub fn back(&mut self) {
        self.step = self.step.previous();
    }

    /// Scan was cancelled before completion: return to pairing.
    pub fn cancel_scan(&mut self) {
        if self.step == Step::Scan {
            self.step = Step::Sensor;
        }
    }

    pub fn show_results(&mut self) {
        self.step = Step::Results;
    }

    /// History selection: replace the current analysis and jump to results.
    pub fn open_analysis(&mut self, record: AnalysisRecord) {
        self.state.apply(Action::SetAnalysis(Some(record)));
        self.step = Step::Results;
    }

    /// "New analysis": wipe the session and go back to intake.
    pub fn start_over(&mut self) {
        self.state.reset();
        self.step = Step::Patient;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_submit_patient_trims_and_advances() {
        let mut flow = SessionFlow::new(Language::Tr);
        flow.submit_patient("  Zeynep Kaya ", "29", Some(Gender::Female)).unwrap();

        assert_eq!(
            flow.state().patient,
            Patient {
                name: "Zeynep Kaya".into(),
                age: Some(29),
                gender: Some(Gender::Female),
            }
        );
        assert_eq!(flow.step(), Step::Organs);
    }

    #[test]
    fn test_submit_patient_checks_name_before_gender() {
        let mut flow = SessionFlow::new(Language::Tr);
        assert_eq!(flow.submit_patient(" ", "", None), Err(ValidationError::NameRequired));
        assert_eq!(flow.submit_patient("Ali", "", None), Err(ValidationError::GenderRequired));
        assert_eq!(flow.step(), Step::Patient);
        assert!(flow.state().patient.is_empty());
    }

    #[test]
    fn test_toggle_preserves_insertion_order() {
        let mut selection = OrganSelection::with_defaults();
        assert!(!selection.toggle(OrganKey::Liver));
        assert!(selection.toggle(OrganKey::Brain));
        assert!(selection.toggle(OrganKey::Liver));
        assert_eq!(
            selection.keys(),
            &[OrganKey::Heart, OrganKey::Kidney, OrganKey::Brain, OrganKey::Liver]
        );
    }

    #[test]
    fn test_organ_names_follow_language() {
        let selection = OrganSelection::from_keys([OrganKey::Immune, OrganKey::Heart]);

        let mut tr = SessionFlow::new(Language::Tr);
        tr.submit_organ_selection(&selection).unwrap();
        assert_eq!(tr.state().selected_organs, vec!["Bağışıklık", "Kalp"]);

        let mut en = SessionFlow::new(Language::En);
        en.submit_organ_selection(&selection).unwrap();
        assert_eq!(en.state().selected_organs, vec!["Immune System", "Heart"]);
    }

    #[test]
    fn test_parse_organ_keys_rejects_unknown() {
        assert_eq!(
            parse_organ_keys(&["heart", "spleen"]),
            Err(ValidationError::UnknownOrgan("spleen".into()))
        );
        let selection = parse_organ_keys(&["heart", "liver", "heart"]).unwrap();
        assert_eq!(selection.keys(), &[OrganKey::Heart, OrganKey::Liver]);
    }

    #[test]
    fn test_back_does_not_clear_values() {
        let mut flow = SessionFlow::new(Language::Tr);
        flow.submit_patient("Ali", "40", Some(Gender::Male)).unwrap();
        flow.submit_organ_selection(&OrganSelection::with_defaults()).unwrap();
        flow.back();
        flow.back();
        assert_eq!(flow.step(), Step::Patient);
        assert_eq!(flow.state().patient.name, "Ali");
        assert_eq!(flow.state().selected_organs.len(), 3);
    }

    #[test]
    fn test_cancel_scan_returns_to_sensor_step() {
        let mut flow = SessionFlow::new(Language::Tr);
        flow.submit_patient("Ali", "", Some(Gender::Male)).unwrap();
        flow.submit_organ_selection(&OrganSelection::with_defaults()).unwrap();
        flow.submit_sensor_choice(SensorType::Usb, Some(&Device::new("usb1", "USB OTG Sensor")))
            .unwrap();
        assert_eq!(flow.step(), Step::Scan);

        flow.cancel_scan();

        assert_eq!(flow.step(), Step::Sensor);
        assert!(flow.state().current_analysis.is_none());
    }
}
