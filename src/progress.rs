//! Progress feedback for the interactive parts of a session.
//!
//! Uses `indicatif` for the scan bar and for spinners around BLE discovery
//! and backend calls. Progress goes to stderr and is hidden when stderr is
//! not a terminal or when `REZZONIX_QUIET` / `--quiet` is set, so piped
//! JSON output stays clean.

use crate::scan::ScanObserver;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

pub const TEMPLATE_SCAN: &str = "{spinner} [{bar:40}] {pos:>3}% {msg}";
pub const TEMPLATE_SPINNER: &str = "{spinner} {msg}";

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

#[derive(Debug, Clone, Default)]
pub struct ProgressConfig {
    pub quiet_mode: bool,
    /// 0 = bar only, 1 and above also echoes milestones
    pub verbosity: u8,
}

impl ProgressConfig {
    pub fn from_env(quiet: bool, verbosity: u8) -> Self {
        let env_quiet = std::env::var("REZZONIX_QUIET").is_ok();
        Self {
            quiet_mode: quiet || env_quiet,
            verbosity,
        }
    }

    pub fn should_show_progress(&self) -> bool {
        if self.quiet_mode {
            return false;
        }

        use std::io::IsTerminal;
        std::io::stderr().is_terminal()
    }
}

#[derive(Clone)]
pub struct ProgressManager {
    multi: Arc<MultiProgress>,
    config: ProgressConfig,
}

impl ProgressManager {
    pub fn new(config: ProgressConfig) -> Self {
        Self {
            multi: Arc::new(MultiProgress::new()),
            config,
        }
    }

    /// A hidden manager, for tests and non-interactive output
    pub fn hidden() -> Self {
        Self::new(ProgressConfig {
            quiet_mode: true,
            verbosity: 0,
        })
    }

    /// Percentage bar for the scan. Hidden when progress is off.
    pub fn create_scan_bar(&self, msg: &str) -> ProgressBar {
        if !self.config.should_show_progress() {
            return ProgressBar::hidden();
        }

        let pb = self.multi.add(ProgressBar::new(100));
        let style = ProgressStyle::default_bar()
            .template(TEMPLATE_SCAN)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░  ")
            .tick_chars(TICK_CHARS);
        pb.set_style(style);
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn create_spinner(&self, msg: &str) -> ProgressBar {
        if !self.config.should_show_progress() {
            return ProgressBar::hidden();
        }

        let pb = self.multi.add(ProgressBar::new_spinner());
        let style = ProgressStyle::default_spinner()
            .template(TEMPLATE_SPINNER)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(TICK_CHARS);
        pb.set_style(style);
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn verbosity(&self) -> u8 {
        self.config.verbosity
    }

    /// Print a line above any active bars
    pub fn println(&self, line: &str) {
        if self.config.should_show_progress() {
            let _ = self.multi.println(line);
        } else if self.config.verbosity > 0 && !self.config.quiet_mode {
            eprintln!("{}", line);
        }
    }

    pub fn clear(&self) -> std::io::Result<()> {
        self.multi.clear()
    }
}

/// Drives a scan bar from the runner's callbacks.
pub struct ScanProgress {
    manager: ProgressManager,
    bar: ProgressBar,
    sending_message: String,
}

impl ScanProgress {
    pub fn new(manager: ProgressManager, title: &str, sending_message: &str) -> Self {
        let bar = manager.create_scan_bar(title);
        Self {
            manager,
            bar,
            sending_message: sending_message.to_string(),
        }
    }
}

impl ScanObserver for ScanProgress {
    fn on_progress(&mut self, progress: f64) {
        self.bar.set_position(progress.floor() as u64);
    }

    fn on_milestone(&mut self, message: &str) {
        self.bar.set_message(message.to_string());
        if self.manager.verbosity() > 0 {
            self.manager.println(&format!("  • {}", message));
        }
    }

    fn on_request_started(&mut self) {
        self.bar.set_message(self.sending_message.clone());
    }

    fn on_finished(&mut self, _analysis_created: bool) {
        self.bar.finish_and_clear();
    }
}

impl Drop for ScanProgress {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.abandon();
        }
    }
}
