use anyhow::Result;
use rezzonix::cli::{self, Cli, Commands};
use rezzonix::commands::{self, scan::ScanArgs, AppContext};
use rezzonix::core::{Language, ValidationError};
use rezzonix::preferences::PreferenceStore;
use rezzonix::session::MockDeviceScanner;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::parse_args();
    cli::init_logging(cli.verbosity);
    let language = cli.language.unwrap_or_else(|| {
        PreferenceStore::default_location()
            .map(|store| store.language())
            .unwrap_or_default()
    });

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", error_message(&err, language));
            ExitCode::FAILURE
        }
    }
}

/// Validation failures are shown in the display language; everything else
/// with its full context chain.
fn error_message(err: &anyhow::Error, language: Language) -> String {
    match err.downcast_ref::<ValidationError>() {
        Some(validation) if language == Language::Tr => validation.message_tr(),
        _ => format!("{:#}", err),
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Init { force } = cli.command {
        return commands::init::init_config(force);
    }

    let ctx = AppContext::from_cli(&cli)?;
    let scanner = MockDeviceScanner::default();

    match cli.command {
        Commands::Scan {
            name,
            age,
            gender,
            organs,
            sensor,
            device,
            format,
            output,
            accept_disclaimer,
        } => {
            let args = ScanArgs {
                name,
                age,
                gender,
                organs,
                sensor,
                device,
                format,
                output,
                accept_disclaimer,
            };
            commands::scan::handle_scan(&ctx, &ctx.client()?, &scanner, args).await
        }
        Commands::Organs => commands::catalog::handle_organs(&ctx),
        Commands::Devices { sensor } => commands::catalog::handle_devices(&ctx, &scanner, sensor).await,
        Commands::History { limit, format } => {
            commands::history::handle_history(&ctx, &ctx.client()?, limit, format).await
        }
        Commands::Show { id, format, output } => {
            commands::history::handle_show(&ctx, &ctx.client()?, &id, format, output.as_deref()).await
        }
        Commands::Export { id, output } => {
            commands::history::handle_export(&ctx, &ctx.client()?, &id, &output).await
        }
        Commands::Patients { action } => {
            commands::patients::handle_patients(&ctx, &ctx.client()?, action).await
        }
        Commands::Language { action } => commands::language::handle_language(&ctx, action),
        Commands::Init { .. } => Ok(()),
    }
}
