use crate::core::{Gender, Language, SensorType};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rezzonix")]
#[command(about = "Supportive bio-resonance analysis client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Hide progress bars and spinners
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (default: search for .rezzonix.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Analysis backend base URL
    #[arg(long = "backend-url", env = "REZZONIX_BACKEND_URL", global = true)]
    pub backend_url: Option<String>,

    /// Display language for this run (default: saved preference)
    #[arg(long = "lang", value_enum, global = true)]
    pub language: Option<Language>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a full session: intake, organ selection, pairing, scan, results
    Scan {
        /// Client name
        #[arg(long)]
        name: String,

        /// Client age (0-120)
        #[arg(long, allow_negative_numbers = true)]
        age: Option<String>,

        #[arg(long, value_enum)]
        gender: Option<Gender>,

        /// Organ keys, comma separated (default: heart,liver,kidney)
        #[arg(long, value_delimiter = ',')]
        organs: Option<Vec<String>>,

        #[arg(long, value_enum, default_value = "ble")]
        sensor: SensorType,

        /// Device id, name or 1-based index from `rezzonix devices`
        #[arg(long)]
        device: Option<String>,

        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Accept the legal notice without prompting
        #[arg(long = "accept-disclaimer")]
        accept_disclaimer: bool,
    },

    /// List the organ catalog
    Organs,

    /// Discover sensors of one type
    Devices {
        #[arg(long, value_enum, default_value = "ble")]
        sensor: SensorType,
    },

    /// List past analyses
    History {
        /// Maximum number of records (default from config)
        #[arg(long)]
        limit: Option<usize>,

        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Fetch one analysis and show its results
    Show {
        id: String,

        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the HTML report for one analysis
    Export {
        id: String,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// Manage clients stored on the backend
    Patients {
        #[command(subcommand)]
        action: PatientsAction,
    },

    /// Show or change the saved display language
    Language {
        #[command(subcommand)]
        action: Option<LanguageAction>,
    },

    /// Initialize a .rezzonix.toml configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum PatientsAction {
    List,
    Create {
        #[arg(long)]
        name: String,

        #[arg(long, allow_negative_numbers = true)]
        age: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum LanguageAction {
    Show,
    Set {
        #[arg(value_enum)]
        language: Language,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
    Html,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
