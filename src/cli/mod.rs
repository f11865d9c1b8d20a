//! Command-line interface for rezzonix
//!
//! - Argument parsing (`args`)
//! - Runtime setup (`setup`)

pub mod args;
pub mod setup;

pub use args::{Cli, Commands, LanguageAction, OutputFormat, PatientsAction};
pub use setup::{default_log_filter, init_logging};

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    args::parse_args()
}
