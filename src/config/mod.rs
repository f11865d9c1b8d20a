//! Application configuration: the optional `.rezzonix.toml` file plus
//! environment overrides.

mod core;
mod loader;

pub use core::{
    default_base_url, default_ble_discovery_ms, default_completion_delay_ms,
    default_history_limit, default_max_increment, default_tick_interval_ms,
    default_timeout_secs, AppConfig, OutputConfig, ScanConfig, ServiceConfig,
};
pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    with_env_overrides, BACKEND_URL_ENV, CONFIG_FILE_NAME,
};

/// Default document written by `rezzonix init`
pub const DEFAULT_CONFIG_TOML: &str = r#"# RezzoniX configuration

[service]
# Analysis backend. REZZONIX_BACKEND_URL overrides this value.
base_url = "http://localhost:8001"
timeout_secs = 30
history_limit = 50

[scan]
tick_interval_ms = 300
max_increment = 8.0
completion_delay_ms = 1500
ble_discovery_ms = 2000

[output]
# auto, always or never
color = "auto"
"#;
