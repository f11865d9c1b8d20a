//! Command handlers. Each handler takes the resolved [`AppContext`] and the
//! parsed arguments of its subcommand.

pub mod catalog;
pub mod history;
pub mod init;
pub mod language;
pub mod patients;
pub mod scan;

use crate::api::HttpAnalysisClient;
use crate::cli::{Cli, OutputFormat};
use crate::config::{self, AppConfig};
use crate::core::Language;
use crate::formatting::{ColoredFormatter, FormattingConfig, OutputFormatter, PlainFormatter};
use crate::preferences::PreferenceStore;
use crate::progress::{ProgressConfig, ProgressManager};
use crate::report::{render_report, render_results, ResultsView};
use anyhow::{Context, Result};

/// Everything a handler needs that is derived from flags, config and
/// preferences rather than from its own arguments.
pub struct AppContext {
    pub config: AppConfig,
    pub language: Language,
    pub formatter: Box<dyn OutputFormatter>,
    pub progress: ProgressManager,
    pub preferences: Option<PreferenceStore>,
}

impl AppContext {
    /// Resolve configuration in order: file, `REZZONIX_BACKEND_URL`, flags.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => config::load_config_from(path)?,
            None => config::load_config(),
        };
        if let Some(url) = &cli.backend_url {
            config.service.base_url = url.clone();
        }

        let preferences = PreferenceStore::default_location();
        let language = cli.language.unwrap_or_else(|| {
            preferences
                .as_ref()
                .map(PreferenceStore::language)
                .unwrap_or_default()
        });

        let formatter: Box<dyn OutputFormatter> = if cli.plain {
            Box::new(PlainFormatter)
        } else {
            Box::new(ColoredFormatter::new(FormattingConfig::from_env(
                config.output.color,
            )))
        };

        tracing::debug!(
            base_url = %config.service.base_url,
            language = %language,
            "context resolved"
        );

        Ok(Self {
            config,
            language,
            formatter,
            progress: ProgressManager::new(ProgressConfig::from_env(cli.quiet, cli.verbosity)),
            preferences,
        })
    }

    pub fn client(&self) -> Result<HttpAnalysisClient> {
        HttpAnalysisClient::new(&self.config.service.base_url, self.config.service.timeout())
            .context("Cannot create analysis service client")
    }

    /// Pick the Turkish or English variant of a message
    pub fn text<'a>(&self, tr: &'a str, en: &'a str) -> &'a str {
        match self.language {
            Language::Tr => tr,
            Language::En => en,
        }
    }
}

/// Render the results step in the requested format.
pub fn render_view(ctx: &AppContext, view: &ResultsView<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Terminal => Ok(render_results(view, ctx.formatter.as_ref(), ctx.language)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&view.record())?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Html => {
            let record = view.record().with_context(|| {
                ctx.text(
                    "Rapor oluşturmak için bir analiz gerekli",
                    "A report needs an analysis",
                )
                .to_string()
            })?;
            Ok(render_report(record, ctx.language))
        }
    }
}
