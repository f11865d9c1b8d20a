//! Async scan runner against an in-process fake backend, on tokio's paused
//! clock.

use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rezzonix::api::{AnalysisRequest, AnalysisService};
use rezzonix::cli::OutputFormat;
use rezzonix::commands::scan::{handle_scan, ScanArgs};
use rezzonix::commands::AppContext;
use rezzonix::config::AppConfig;
use rezzonix::core::{
    AnalysisRecord, Gender, Language, OrganResult, SensorType, ServiceError, ValidationError,
};
use rezzonix::formatting::PlainFormatter;
use rezzonix::progress::ProgressManager;
use rezzonix::scan::{run_scan, ScanObserver, ScanOutcome, ScanSettings, SilentObserver};
use rezzonix::session::{Device, MockDeviceScanner, OrganSelection, SessionFlow, Step};
use std::cell::{Cell, RefCell};
use std::time::Duration;

struct FakeService {
    fail: bool,
    calls: Cell<usize>,
    last_request: RefCell<Option<AnalysisRequest>>,
}

impl FakeService {
    fn ok() -> Self {
        Self {
            fail: false,
            calls: Cell::new(0),
            last_request: RefCell::new(None),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::ok()
        }
    }
}

fn record_for(request: &AnalysisRequest) -> AnalysisRecord {
    AnalysisRecord {
        id: "a-1".into(),
        patient_id: String::new(),
        patient_name: request.patient_name.clone(),
        patient_age: request.patient_age,
        selected_organs: request.selected_organs.clone(),
        overall_score: 81,
        band: "Dengeli".into(),
        results: request
            .selected_organs
            .iter()
            .map(|organ| OrganResult {
                organ: organ.clone(),
                score: 81,
                stress: 2,
                note: "Destekleyici gözlem: denge takibi önerilir.".into(),
            })
            .collect(),
        sensor_type: request.sensor_type,
        sensor_name: request.sensor_name.clone(),
        frequency: 528,
        created_at: Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap(),
    }
}

impl AnalysisService for FakeService {
    async fn create_analysis(&self, request: &AnalysisRequest) -> Result<AnalysisRecord, ServiceError> {
        self.calls.set(self.calls.get() + 1);
        *self.last_request.borrow_mut() = Some(request.clone());
        if self.fail {
            Err(ServiceError::Transport("connection refused".into()))
        } else {
            Ok(record_for(request))
        }
    }

    async fn list_analyses(&self, _limit: usize) -> Result<Vec<AnalysisRecord>, ServiceError> {
        Ok(Vec::new())
    }

    async fn get_analysis(&self, _id: &str) -> Result<AnalysisRecord, ServiceError> {
        Err(ServiceError::Status {
            status: 404,
            body: "not found".into(),
        })
    }
}

#[derive(Default)]
struct Recorder {
    progress: Vec<f64>,
    milestones: Vec<String>,
    request_started: usize,
    finished: Option<bool>,
}

impl ScanObserver for Recorder {
    fn on_progress(&mut self, progress: f64) {
        self.progress.push(progress);
    }

    fn on_milestone(&mut self, message: &str) {
        self.milestones.push(message.to_string());
    }

    fn on_request_started(&mut self) {
        self.request_started += 1;
    }

    fn on_finished(&mut self, analysis_created: bool) {
        self.finished = Some(analysis_created);
    }
}

fn flow_at_scan_step() -> SessionFlow {
    let mut flow = SessionFlow::new(Language::Tr);
    flow.submit_patient("Elif Şahin", "52", Some(Gender::Female))
        .unwrap();
    flow.submit_organ_selection(&OrganSelection::with_defaults())
        .unwrap();
    flow.submit_sensor_choice(
        SensorType::Usb,
        Some(&Device::new("usb1", "USB OTG Sensor")),
    )
    .unwrap();
    flow
}

#[tokio::test(start_paused = true)]
async fn test_completed_scan_sends_one_request_and_shows_results() {
    let mut flow = flow_at_scan_step();
    let service = FakeService::ok();
    let mut rng = StdRng::seed_from_u64(7);
    let mut recorder = Recorder::default();

    let outcome = run_scan(
        &mut flow,
        &service,
        &ScanSettings::default(),
        &mut rng,
        std::future::pending::<()>(),
        &mut recorder,
    )
    .await;

    assert_eq!(outcome, ScanOutcome::Completed { analysis_created: true });
    assert_eq!(service.calls.get(), 1);
    assert_eq!(flow.step(), Step::Results);

    let request = service.last_request.borrow().clone().unwrap();
    assert_eq!(request.patient_name, "Elif Şahin");
    assert_eq!(request.patient_age, Some(52));
    assert_eq!(request.sensor_type, SensorType::Usb);
    assert_eq!(request.sensor_name.as_deref(), Some("USB OTG Sensor"));

    let analysis = flow.state().current_analysis.as_ref().unwrap();
    assert_eq!(analysis.id, "a-1");
    assert!(flow.state().is_online);

    assert_eq!(recorder.progress.last().copied(), Some(100.0));
    assert!(recorder.progress.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(recorder.milestones.len(), 7);
    assert_eq!(recorder.request_started, 1);
    assert_eq!(recorder.finished, Some(true));
}

#[tokio::test(start_paused = true)]
async fn test_service_failure_still_reaches_results() {
    let mut flow = flow_at_scan_step();
    let service = FakeService::failing();
    let mut rng = StdRng::seed_from_u64(11);

    let outcome = run_scan(
        &mut flow,
        &service,
        &ScanSettings::default(),
        &mut rng,
        std::future::pending::<()>(),
        &mut SilentObserver,
    )
    .await;

    assert_eq!(outcome, ScanOutcome::Completed { analysis_created: false });
    assert_eq!(service.calls.get(), 1);
    assert_eq!(flow.step(), Step::Results);
    assert!(flow.state().current_analysis.is_none());
    assert!(!flow.state().is_online);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_never_calls_service() {
    let mut flow = flow_at_scan_step();
    let service = FakeService::ok();
    let mut rng = StdRng::seed_from_u64(3);

    let outcome = run_scan(
        &mut flow,
        &service,
        &ScanSettings::default(),
        &mut rng,
        std::future::ready(()),
        &mut SilentObserver,
    )
    .await;

    assert_eq!(outcome, ScanOutcome::Cancelled);
    assert_eq!(service.calls.get(), 0);
    assert_eq!(flow.step(), Step::Sensor);
    assert!(flow.state().current_analysis.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_mid_scan() {
    let mut flow = flow_at_scan_step();
    let service = FakeService::ok();
    let mut rng = StdRng::seed_from_u64(5);
    let mut recorder = Recorder::default();

    let outcome = run_scan(
        &mut flow,
        &service,
        &ScanSettings::default(),
        &mut rng,
        tokio::time::sleep(Duration::from_millis(1000)),
        &mut recorder,
    )
    .await;

    // 8% at most per 300 ms tick: nowhere near done after a second
    assert_eq!(outcome, ScanOutcome::Cancelled);
    assert_eq!(service.calls.get(), 0);
    assert!(!recorder.progress.is_empty());
    assert!(recorder.progress.iter().all(|p| *p < 100.0));
    assert_eq!(recorder.finished, None);
}

#[tokio::test(start_paused = true)]
async fn test_completion_delay_is_respected() {
    let mut flow = flow_at_scan_step();
    let service = FakeService::ok();
    let mut rng = StdRng::seed_from_u64(9);
    let settings = ScanSettings {
        tick_interval: Duration::from_millis(10),
        max_increment: 50.0,
        completion_delay: Duration::from_secs(5),
    };

    let started = tokio::time::Instant::now();
    run_scan(
        &mut flow,
        &service,
        &settings,
        &mut rng,
        std::future::pending::<()>(),
        &mut SilentObserver,
    )
    .await;

    assert!(started.elapsed() >= Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn test_zero_step_settings_still_complete() {
    let mut flow = flow_at_scan_step();
    let service = FakeService::ok();
    let mut rng = StdRng::seed_from_u64(13);
    let settings = ScanSettings {
        tick_interval: Duration::ZERO,
        max_increment: 0.0,
        completion_delay: Duration::ZERO,
    };

    let outcome = run_scan(
        &mut flow,
        &service,
        &settings,
        &mut rng,
        std::future::pending::<()>(),
        &mut SilentObserver,
    )
    .await;

    assert_eq!(outcome, ScanOutcome::Completed { analysis_created: true });
    assert_eq!(service.calls.get(), 1);
    assert_eq!(flow.step(), Step::Results);
}

#[tokio::test(start_paused = true)]
async fn test_nan_step_still_completes() {
    let mut flow = flow_at_scan_step();
    let service = FakeService::ok();
    let mut rng = StdRng::seed_from_u64(17);
    let settings = ScanSettings {
        max_increment: f64::NAN,
        ..ScanSettings::default()
    };

    let outcome = run_scan(
        &mut flow,
        &service,
        &settings,
        &mut rng,
        std::future::pending::<()>(),
        &mut SilentObserver,
    )
    .await;

    assert_eq!(outcome, ScanOutcome::Completed { analysis_created: true });
}

fn quiet_context() -> AppContext {
    AppContext {
        config: AppConfig::default(),
        language: Language::Tr,
        formatter: Box::new(PlainFormatter),
        progress: ProgressManager::hidden(),
        preferences: None,
    }
}

#[tokio::test(start_paused = true)]
async fn test_scan_without_ble_devices_stops_before_request() {
    let ctx = quiet_context();
    let service = FakeService::ok();
    let args = ScanArgs {
        name: "Elif Şahin".into(),
        age: Some("52".into()),
        gender: Some(Gender::Female),
        organs: None,
        sensor: SensorType::Ble,
        device: None,
        format: OutputFormat::Json,
        output: None,
        accept_disclaimer: true,
    };

    let err = handle_scan(&ctx, &service, &MockDeviceScanner::empty(), args)
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ValidationError>(),
        Some(ValidationError::NoDeviceSelected)
    ));
    assert_eq!(service.calls.get(), 0);
}
