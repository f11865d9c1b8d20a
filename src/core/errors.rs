//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Input rejected by one of the session steps.
///
/// These never change session state; the caller shows the message and the
/// user stays on the same step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Patient name is required")]
    NameRequired,

    #[error("Please select a gender")]
    GenderRequired,

    #[error("Age must be a whole number between 0 and 120 (got '{0}')")]
    InvalidAge(String),

    #[error("Select at least one organ")]
    NoOrgansSelected,

    #[error("Unknown organ key '{0}'")]
    UnknownOrgan(String),

    #[error("Select a sensor device to continue")]
    NoDeviceSelected,

    #[error("The disclaimer must be accepted before starting an analysis")]
    DisclaimerNotAccepted,
}

impl ValidationError {
    /// Turkish alert text for the error, as shown by the app in its default language.
    pub fn message_tr(&self) -> String {
        match self {
            Self::NameRequired => "Lütfen danışan adını girin.".to_string(),
            Self::GenderRequired => "Lütfen cinsiyet seçin.".to_string(),
            Self::InvalidAge(_) => "Yaş 0 ile 120 arasında olmalıdır.".to_string(),
            Self::NoOrgansSelected => "En az bir organ seçin.".to_string(),
            Self::UnknownOrgan(key) => format!("Bilinmeyen organ: {}", key),
            Self::NoDeviceSelected => "Lütfen bir sensör cihazı seçin.".to_string(),
            Self::DisclaimerNotAccepted => "Devam etmek için yasal bildirimi kabul edin.".to_string(),
        }
    }
}

/// Failure talking to the analysis backend.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Analysis service request timed out")]
    Timeout,

    #[error("Analysis service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not decode analysis service response: {0}")]
    Decode(String),

    #[error("Analysis service unreachable: {0}")]
    Transport(String),

    #[error("Invalid analysis service URL '{0}'")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_builder() {
            Self::InvalidUrl(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Main error type for rezzonix operations
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Preference file errors
    #[error("Preference error in {path}: {message}")]
    Preference { path: PathBuf, message: String },

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }

    /// Whether the user can fix this by changing their input.
    pub fn is_user_fixable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Configuration(_))
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
