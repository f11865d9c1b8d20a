// Export modules for library usage
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod formatting;
pub mod io;
pub mod preferences;
pub mod progress;
pub mod report;
pub mod scan;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    AnalysisRecord, BandLevel, Error, Gender, Language, OrganKey, OrganResult, Patient, Result,
    SensorType, ServiceError, ValidationError,
};

pub use crate::api::{AnalysisRequest, AnalysisService, HttpAnalysisClient};
pub use crate::config::{load_config, AppConfig};
pub use crate::report::{render_report, Recommendations, ResultsView};
pub use crate::scan::{run_scan, ScanOutcome, ScanSettings, ScanSimulator};
pub use crate::session::{Action, OrganSelection, SessionFlow, SessionState, Step};
