//! Persisted user preferences. Only the display language is stored.

use crate::core::{Error, Language, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const PREFERENCES_FILE_NAME: &str = "preferences.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub app_language: Language,
}

/// File-backed preference store, `<config dir>/rezzonix/preferences.toml`
/// unless a path is given.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join("rezzonix").join(PREFERENCES_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored preferences. A missing or unreadable file yields the
    /// defaults; problems other than absence are logged.
    pub fn load(&self) -> Preferences {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to read {}: {}", self.path.display(), e);
                }
                return Preferences::default();
            }
        };

        match toml::from_str::<Preferences>(&contents) {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!(
                    "Ignoring invalid preferences in {}: {}",
                    self.path.display(),
                    e
                );
                Preferences::default()
            }
        }
    }

    pub fn language(&self) -> Language {
        self.load().app_language
    }

    pub fn save(&self, prefs: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.error(e.to_string()))?;
        }
        let contents = toml::to_string(prefs).map_err(|e| self.error(e.to_string()))?;
        fs::write(&self.path, contents).map_err(|e| self.error(e.to_string()))?;
        tracing::debug!(language = %prefs.app_language, "saved preferences");
        Ok(())
    }

    pub fn set_language(&self, language: Language) -> Result<()> {
        let mut prefs = self.load();
        prefs.app_language = language;
        self.save(&prefs)
    }

    fn error(&self, message: String) -> Error {
        Error::Preference {
            path: self.path.clone(),
            message,
        }
    }
}
