use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::AppConfig;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".rezzonix.toml";
pub const BACKEND_URL_ENV: &str = "REZZONIX_BACKEND_URL";
const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse a TOML document and check its value ranges
pub fn parse_and_validate_config(contents: &str) -> std::result::Result<AppConfig, String> {
    let config = toml::from_str::<AppConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    config
        .validate()
        .map_err(|errors| format!("Invalid configuration: {}", errors.join("; ")))?;

    Ok(config)
}

fn try_load_config_from_path(config_path: &Path) -> Option<AppConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!("{} ({}). Using defaults.", e, config_path.display());
            None
        }
    }
}

/// Yield `start` and its parents, at most `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search the working directory and its ancestors for `.rezzonix.toml`.
/// A broken file found on the way is reported and skipped.
pub fn load_config() -> AppConfig {
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return with_env_overrides(AppConfig::default());
        }
    };

    let config = directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            AppConfig::default()
        });

    with_env_overrides(config)
}

/// Load an explicitly named file. Unlike the ancestor search, any problem
/// with it is an error.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let contents = read_config_file(path).map_err(|e| {
        Error::Configuration(format!("cannot read {}: {}", path.display(), e))
    })?;
    let config = parse_and_validate_config(&contents).map_err(Error::Configuration)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(with_env_overrides(config))
}

/// `REZZONIX_BACKEND_URL` wins over the file
pub fn with_env_overrides(config: AppConfig) -> AppConfig {
    apply_backend_override(config, std::env::var(BACKEND_URL_ENV).ok())
}

pub(crate) fn apply_backend_override(mut config: AppConfig, value: Option<String>) -> AppConfig {
    if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        tracing::debug!("Backend URL overridden by {}", BACKEND_URL_ENV);
        config.service.base_url = url;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = parse_and_validate_config("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.service.base_url, "http://localhost:8001");
        assert_eq!(config.scan.tick_interval_ms, 300);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = parse_and_validate_config(indoc! {r#"
            [service]
            base_url = "https://analiz.example.org"

            [scan]
            tick_interval_ms = 50
        "#})
        .unwrap();
        assert_eq!(config.service.base_url, "https://analiz.example.org");
        assert_eq!(config.service.timeout_secs, 30);
        assert_eq!(config.scan.tick_interval_ms, 50);
        assert_eq!(config.scan.completion_delay_ms, 1500);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = parse_and_validate_config("[service]\nbase = \"x\"\n").unwrap_err();
        assert!(err.contains("Failed to parse"));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let err = parse_and_validate_config(indoc! {r#"
            [service]
            base_url = "ftp://nope"
            timeout_secs = 0
        "#})
        .unwrap_err();
        assert!(err.contains("base_url"));
        assert!(err.contains("timeout_secs"));
    }

    #[test]
    fn test_directory_ancestors_stops_at_depth() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c/d"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c/d"), PathBuf::from("/a/b/c")]);
    }

    #[test]
    fn test_load_config_from_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let result = load_config_from(&temp.path().join("missing.toml"));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[service]\nhistory_limit = 5\n").unwrap();
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.service.history_limit, 5);
    }

    #[test]
    fn test_backend_override() {
        let config = apply_backend_override(AppConfig::default(), Some(" http://10.0.0.2:9000 ".into()));
        assert_eq!(config.service.base_url, "http://10.0.0.2:9000");

        let config = apply_backend_override(AppConfig::default(), Some("   ".into()));
        assert_eq!(config.service.base_url, "http://localhost:8001");
    }
}
