//! Simulated scan: a pure progress model and the async runner that drives it.

pub mod runner;
pub mod simulator;

pub use runner::{run_scan, ScanObserver, ScanOutcome, ScanSettings, SilentObserver};
pub use simulator::{
    default_milestones, next_progress, random_increment, Milestone, MilestoneError, ScanSimulator,
    TickOutcome, COMPLETE,
};
