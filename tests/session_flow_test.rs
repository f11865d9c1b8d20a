//! Integration tests for the step controller and sensor pairing.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rezzonix::core::{Gender, Language, OrganKey, SensorType, ValidationError};
use rezzonix::session::{
    parse_organ_keys, Device, MockDeviceScanner, OrganSelection, SensorPairing, SessionFlow, Step,
};

fn flow_at_sensor_step(language: Language) -> SessionFlow {
    let mut flow = SessionFlow::new(language);
    flow.submit_patient("Mehmet Yılmaz", "47", Some(Gender::Male))
        .unwrap();
    flow.submit_organ_selection(&OrganSelection::with_defaults())
        .unwrap();
    flow
}

#[test]
fn test_full_walk_to_scan_step() {
    let mut flow = flow_at_sensor_step(Language::Tr);
    assert_eq!(flow.step(), Step::Sensor);
    assert_eq!(
        flow.state().selected_organs,
        vec!["Kalp".to_string(), "Karaciğer".to_string(), "Böbrek".to_string()]
    );

    let mut pairing = SensorPairing::new();
    pairing.select_type(SensorType::Ble);
    pairing.scan(&MockDeviceScanner::default());
    let device = pairing.select_device("2").cloned();
    flow.submit_sensor_choice(SensorType::Ble, device.as_ref())
        .unwrap();

    assert_eq!(flow.step(), Step::Scan);
    assert_eq!(flow.state().sensor_type, Some(SensorType::Ble));
    assert_eq!(
        flow.state().sensor_name.as_deref(),
        Some("RezzoniX Pro Scanner")
    );
}

#[test]
fn test_blank_name_is_rejected_without_state_change() {
    let mut flow = SessionFlow::new(Language::Tr);
    let before = flow.state().clone();

    let err = flow.submit_patient("   ", "30", Some(Gender::Female)).unwrap_err();

    assert_eq!(err, ValidationError::NameRequired);
    assert_eq!(flow.state(), &before);
    assert_eq!(flow.step(), Step::Patient);
}

#[test]
fn test_missing_gender_checked_before_age() {
    let mut flow = SessionFlow::new(Language::En);
    let err = flow.submit_patient("Ali", "abc", None).unwrap_err();
    assert_eq!(err, ValidationError::GenderRequired);
}

#[test]
fn test_empty_organ_selection_is_rejected() {
    let mut flow = SessionFlow::new(Language::Tr);
    flow.submit_patient("Ali", "", Some(Gender::Child)).unwrap();

    let mut selection = OrganSelection::with_defaults();
    for key in selection.keys().to_vec() {
        selection.toggle(key);
    }

    assert_eq!(
        flow.submit_organ_selection(&selection),
        Err(ValidationError::NoOrgansSelected)
    );
    assert!(flow.state().selected_organs.is_empty());
    assert_eq!(flow.step(), Step::Organs);
}

#[test]
fn test_organ_names_follow_language() {
    let mut flow = SessionFlow::new(Language::En);
    flow.submit_patient("Jane", "", Some(Gender::Female)).unwrap();
    let selection = parse_organ_keys(&["immune", "brain"]).unwrap();
    flow.submit_organ_selection(&selection).unwrap();

    assert_eq!(
        flow.state().selected_organs,
        vec!["Immune System".to_string(), "Brain".to_string()]
    );
}

#[test]
fn test_unknown_organ_key() {
    let err = parse_organ_keys(&["heart", "spleen"]).unwrap_err();
    assert_eq!(err, ValidationError::UnknownOrgan("spleen".into()));
}

#[test]
fn test_no_ble_devices_blocks_sensor_step() {
    let mut flow = flow_at_sensor_step(Language::Tr);
    let mut pairing = SensorPairing::new();
    pairing.select_type(SensorType::Ble);
    let found = pairing.scan(&MockDeviceScanner::empty()).len();
    assert_eq!(found, 0);

    let device = pairing.select_device("1").cloned();
    let err = flow
        .submit_sensor_choice(SensorType::Ble, device.as_ref())
        .unwrap_err();

    assert_eq!(err, ValidationError::NoDeviceSelected);
    assert_eq!(flow.step(), Step::Sensor);
    assert_eq!(flow.state().sensor_type, None);
}

#[test]
fn test_switching_sensor_type_clears_choice() {
    let scanner = MockDeviceScanner::with_devices(
        vec![Device::new("a", "BLE A")],
        vec![Device::new("u", "USB U")],
    );
    let mut pairing = SensorPairing::new();
    pairing.select_type(SensorType::Ble);
    pairing.scan(&scanner);
    assert!(pairing.select_device("a").is_some());

    pairing.select_type(SensorType::Usb);
    assert!(pairing.selected().is_none());
    assert!(pairing.devices().is_empty());

    pairing.scan(&scanner);
    assert_eq!(pairing.select_device("usb u").map(|d| d.id.as_str()), Some("u"));
}

#[test]
fn test_start_over_resets_everything() {
    let mut flow = flow_at_sensor_step(Language::Tr);
    flow.start_over();
    assert_eq!(flow.step(), Step::Patient);
    assert!(flow.state().patient.is_empty());
    assert!(flow.state().selected_organs.is_empty());
    assert!(flow.state().is_online);
}

#[test]
fn test_back_from_sensor_keeps_selection() {
    let mut flow = flow_at_sensor_step(Language::Tr);
    flow.back();
    assert_eq!(flow.step(), Step::Organs);
    assert_eq!(flow.state().selected_organs.len(), 3);
}

#[test]
fn test_toggle_preserves_insertion_order() {
    let mut selection = OrganSelection::new();
    selection.toggle(OrganKey::Spine);
    selection.toggle(OrganKey::Brain);
    selection.toggle(OrganKey::Lung);
    selection.toggle(OrganKey::Brain);
    assert_eq!(selection.keys(), &[OrganKey::Spine, OrganKey::Lung]);
}

proptest! {
    #[test]
    fn prop_ages_in_range_are_accepted(age in 0u8..=120) {
        let mut flow = SessionFlow::new(Language::Tr);
        prop_assert!(flow.submit_patient("Ali", &age.to_string(), Some(Gender::Male)).is_ok());
        prop_assert_eq!(flow.state().patient.age, Some(age));
    }

    #[test]
    fn prop_ages_above_range_are_rejected(age in 121u32..100_000) {
        let mut flow = SessionFlow::new(Language::Tr);
        let result = flow.submit_patient("Ali", &age.to_string(), Some(Gender::Male));
        prop_assert!(matches!(result, Err(ValidationError::InvalidAge(_))));
        prop_assert_eq!(flow.step(), Step::Patient);
    }

    #[test]
    fn prop_toggle_twice_is_identity(index in 0usize..12) {
        let key = OrganKey::ALL[index];
        let mut selection = OrganSelection::with_defaults();
        let before = selection.keys().to_vec();
        selection.toggle(key);
        selection.toggle(key);
        let mut after = selection.keys().to_vec();
        // a default organ toggled off and on moves to the end
        after.sort_by_key(|k| k.key());
        let mut expected = before;
        expected.sort_by_key(|k| k.key());
        prop_assert_eq!(after, expected);
    }
}
