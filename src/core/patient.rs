use super::errors::ValidationError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Upper bound accepted for a patient's age.
pub const MAX_AGE: u8 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Child,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Child => "child",
        }
    }
}

/// Patient identity captured at intake.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

impl Patient {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.age.is_none() && self.gender.is_none()
    }
}

/// Parse the free-text age field.
///
/// Returns `Ok(None)` for blank input and `InvalidAge` for anything that is
/// not a whole number in `0..=MAX_AGE`.
pub fn parse_age(text: &str) -> Result<Option<u8>, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<i64>() {
        Ok(age) if (0..=i64::from(MAX_AGE)).contains(&age) => Ok(Some(age as u8)),
        _ => Err(ValidationError::InvalidAge(trimmed.to_string())),
    }
}
