//! Timer-driven effect around [`ScanSimulator`].
//!
//! The runner ticks the simulator on a fixed interval until it reports
//! completion, then issues exactly one analysis request. Cancellation is
//! only honoured while the timer is running; once the request is in
//! flight it is awaited to the end.

use super::simulator::{random_increment, ScanSimulator, DEFAULT_MAX_INCREMENT};
use crate::api::{AnalysisRequest, AnalysisService};
use crate::session::{Action, SessionFlow};
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct ScanSettings {
    pub tick_interval: Duration,
    pub max_increment: f64,
    /// Pause between the request finishing and the results step.
    pub completion_delay: Duration,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(300),
            max_increment: DEFAULT_MAX_INCREMENT,
            completion_delay: Duration::from_millis(1500),
        }
    }
}

/// Shortest tick the runner accepts; `tokio::time::interval` rejects zero.
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

impl ScanSettings {
    /// Replace values that would stall or panic the runner: a zero tick
    /// interval and a step that is not a positive finite number.
    pub fn sanitized(&self) -> Self {
        let mut settings = self.clone();
        if settings.tick_interval < MIN_TICK_INTERVAL {
            warn!(tick_interval = ?settings.tick_interval, "tick interval too short; using 1 ms");
            settings.tick_interval = MIN_TICK_INTERVAL;
        }
        if !(settings.max_increment.is_finite() && settings.max_increment > 0.0) {
            warn!(
                max_increment = settings.max_increment,
                "scan step must be positive; using default {}", DEFAULT_MAX_INCREMENT
            );
            settings.max_increment = DEFAULT_MAX_INCREMENT;
        }
        settings
    }
}

/// Receives the visible side of a running scan.
pub trait ScanObserver {
    fn on_progress(&mut self, _progress: f64) {}
    fn on_milestone(&mut self, _message: &str) {}
    fn on_request_started(&mut self) {}
    fn on_finished(&mut self, _analysis_created: bool) {}
}

/// Observer that discards everything.
pub struct SilentObserver;

impl ScanObserver for SilentObserver {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Reached 100% and moved to the results step. `analysis_created` is
    /// false when the backend call failed and the session kept its previous
    /// analysis (possibly none).
    Completed { analysis_created: bool },
    /// Aborted before the request was sent.
    Cancelled,
}

pub async fn run_scan<S, R, C, O>(
    flow: &mut SessionFlow,
    service: &S,
    settings: &ScanSettings,
    rng: &mut R,
    cancel: C,
    observer: &mut O,
) -> ScanOutcome
where
    S: AnalysisService,
    R: Rng + ?Sized,
    C: Future<Output = ()>,
    O: ScanObserver + ?Sized,
{
    let settings = settings.sanitized();
    let mut simulator = ScanSimulator::with_defaults(flow.language());
    let mut interval = tokio::time::interval(settings.tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; start counting from here.
    interval.tick().await;
    tokio::pin!(cancel);

    info!(organs = flow.state().selected_organs.len(), "scan started");
    loop {
        tokio::select! {
            biased;
            _ = &mut cancel => {
                flow.cancel_scan();
                info!(progress = simulator.progress(), "scan cancelled");
                return ScanOutcome::Cancelled;
            }
            _ = interval.tick() => {
                let outcome = simulator.tick(random_increment(rng, settings.max_increment));
                observer.on_progress(outcome.progress);
                for message in &outcome.fired {
                    debug!(message = %message, "scan milestone");
                    observer.on_milestone(message);
                }
                if outcome.complete {
                    break;
                }
            }
        }
    }

    let request = AnalysisRequest::from_session(flow.state());
    observer.on_request_started();
    let analysis_created = match service.create_analysis(&request).await {
        Ok(record) => {
            info!(id = %record.id, score = record.overall_score, "analysis created");
            let state = flow.state_mut();
            state.apply(Action::SetAnalysis(Some(record)));
            state.apply(Action::SetOnline(true));
            true
        }
        Err(err) => {
            warn!(error = %err, "analysis request failed; showing results without a new record");
            flow.state_mut().apply(Action::SetOnline(false));
            false
        }
    };

    tokio::time::sleep(settings.completion_delay).await;
    flow.show_results();
    observer.on_finished(analysis_created);
    ScanOutcome::Completed { analysis_created }
}
