//! Domain types shared by the session flow, the service client and the
//! report renderer.

pub mod analysis;
pub mod errors;
pub mod language;
pub mod organs;
pub mod patient;

pub use analysis::{AnalysisRecord, BandLevel, OrganResult, SensorType, DEFAULT_FREQUENCY_HZ};
pub use errors::{Error, Result, ResultExt, ServiceError, ValidationError};
pub use language::Language;
pub use organs::{OrganKey, DEFAULT_SELECTION};
pub use patient::{parse_age, Gender, Patient, MAX_AGE};
