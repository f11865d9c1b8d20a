//! HTTP implementation of [`AnalysisService`] on top of `reqwest`.

use super::models::{AnalysisRequest, PatientCreate, PatientRecord};
use super::AnalysisService;
use crate::core::{AnalysisRecord, ServiceError};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::debug;

/// Request timeout used when the configuration does not set one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    http: Client,
    base_url: String,
}

impl HttpAnalysisClient {
    /// `base_url` is the backend root; the `/api` prefix is added here.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ServiceError::InvalidUrl(base_url));
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    pub async fn create_patient(&self, patient: &PatientCreate) -> Result<PatientRecord, ServiceError> {
        let started = Instant::now();
        let response = self.http.post(self.endpoint("/patients")).json(patient).send().await?;
        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "POST /api/patients");
        decode(response).await
    }

    pub async fn list_patients(&self) -> Result<Vec<PatientRecord>, ServiceError> {
        let response = self.http.get(self.endpoint("/patients")).send().await?;
        decode(response).await
    }
}

impl AnalysisService for HttpAnalysisClient {
    async fn create_analysis(&self, request: &AnalysisRequest) -> Result<AnalysisRecord, ServiceError> {
        let started = Instant::now();
        let response = self.http.post(self.endpoint("/analysis")).json(request).send().await?;
        debug!(
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "POST /api/analysis"
        );
        decode(response).await
    }

    async fn list_analyses(&self, limit: usize) -> Result<Vec<AnalysisRecord>, ServiceError> {
        let response = self
            .http
            .get(self.endpoint("/analysis"))
            .query(&[("limit", limit)])
            .send()
            .await?;
        debug!(status = response.status().as_u16(), limit, "GET /api/analysis");
        decode(response).await
    }

    async fn get_analysis(&self, id: &str) -> Result<AnalysisRecord, ServiceError> {
        let id = id.trim();
        if id.is_empty() || id.contains('/') {
            return Err(ServiceError::InvalidUrl(format!("analysis id '{}'", id)));
        }
        let response = self.http.get(self.endpoint(&format!("/analysis/{}", id))).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ServiceError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ServiceError::Decode(e.to_string()))
}
