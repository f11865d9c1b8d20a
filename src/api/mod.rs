//! Client side of the external analysis backend.
//!
//! The backend computes and stores analyses; this crate only creates and
//! fetches them. Every call is a single attempt; callers decide what a
//! failure means for the flow.

pub mod client;
pub mod models;

pub use client::{HttpAnalysisClient, DEFAULT_TIMEOUT};
pub use models::{AnalysisRequest, PatientCreate, PatientRecord};

use crate::core::{AnalysisRecord, ServiceError};

/// Operations the session flow needs from the backend.
#[allow(async_fn_in_trait)]
pub trait AnalysisService {
    /// `POST /api/analysis`
    async fn create_analysis(&self, request: &AnalysisRequest) -> Result<AnalysisRecord, ServiceError>;

    /// `GET /api/analysis?limit=N`, most recent first.
    async fn list_analyses(&self, limit: usize) -> Result<Vec<AnalysisRecord>, ServiceError>;

    /// `GET /api/analysis/{id}`
    async fn get_analysis(&self, id: &str) -> Result<AnalysisRecord, ServiceError>;
}
