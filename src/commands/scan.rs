//! `scan`: one complete session from intake to results.

use super::catalog::discover;
use super::{render_view, AppContext};
use crate::api::AnalysisService;
use crate::cli::OutputFormat;
use crate::core::{Gender, Language, SensorType, ValidationError};
use crate::io;
use crate::progress::ScanProgress;
use crate::report::{disclaimer, ResultsView};
use crate::scan::{run_scan, ScanOutcome};
use crate::session::{
    parse_organ_keys, DeviceScanner, OrganSelection, SensorPairing, SessionFlow, SessionState,
};
use anyhow::Result;
use std::io::IsTerminal;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Clone)]
pub struct ScanArgs {
    pub name: String,
    pub age: Option<String>,
    pub gender: Option<Gender>,
    pub organs: Option<Vec<String>>,
    pub sensor: SensorType,
    pub device: Option<String>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub accept_disclaimer: bool,
}

pub async fn handle_scan<S, D>(ctx: &AppContext, service: &S, scanner: &D, args: ScanArgs) -> Result<()>
where
    S: AnalysisService,
    D: DeviceScanner,
{
    if !args.accept_disclaimer && !confirm_disclaimer(ctx).await? {
        return Err(ValidationError::DisclaimerNotAccepted.into());
    }

    let mut flow = SessionFlow::new(ctx.language);
    prepare_session(ctx, &mut flow, scanner, &args).await?;

    let mut observer = ScanProgress::new(
        ctx.progress.clone(),
        ctx.text("Analiz yapılıyor", "Analyzing"),
        ctx.text("Sonuçlar hazırlanıyor...", "Preparing results..."),
    );
    let settings = ctx.config.scan.settings();
    let mut rng = rand::thread_rng();
    let outcome = run_scan(
        &mut flow,
        service,
        &settings,
        &mut rng,
        interrupted(),
        &mut observer,
    )
    .await;

    match outcome {
        ScanOutcome::Cancelled => {
            eprintln!(
                "{}",
                ctx.formatter
                    .warning(ctx.text("Tarama iptal edildi", "Scan cancelled"))
            );
            Ok(())
        }
        ScanOutcome::Completed { analysis_created } => {
            tracing::debug!(analysis_created, online = flow.state().is_online, "scan finished");
            if let Some(notice) = offline_notice(flow.state(), ctx.language) {
                eprintln!("{}", ctx.formatter.warning(notice));
            }
            let view = ResultsView::from_state(flow.state());
            let out = render_view(ctx, &view, args.format)?;
            io::emit(args.output.as_deref(), &out)
        }
    }
}

/// Walk the intake, organ and sensor steps with the given arguments.
/// Stops at the first step that rejects its input.
pub async fn prepare_session<D: DeviceScanner>(
    ctx: &AppContext,
    flow: &mut SessionFlow,
    scanner: &D,
    args: &ScanArgs,
) -> Result<(), ValidationError> {
    flow.submit_patient(&args.name, args.age.as_deref().unwrap_or(""), args.gender)?;

    let selection = match &args.organs {
        Some(keys) => parse_organ_keys(keys)?,
        None => OrganSelection::with_defaults(),
    };
    flow.submit_organ_selection(&selection)?;

    let mut pairing = SensorPairing::new();
    let devices = discover(ctx, &mut pairing, scanner, args.sensor).await;
    let chosen = match args.device.as_deref() {
        Some(query) => pairing.select_device(query).cloned(),
        None if devices.len() == 1 => pairing.select_device(&devices[0].id).cloned(),
        None => None,
    };
    flow.submit_sensor_choice(args.sensor, chosen.as_ref())
}

async fn confirm_disclaimer(ctx: &AppContext) -> Result<bool> {
    if !std::io::stdin().is_terminal() {
        return Ok(false);
    }

    eprintln!("{}", ctx.formatter.header(ctx.text("Yasal Bildirim", "Legal Notice")));
    eprintln!("{}", disclaimer(ctx.language));
    eprint!(
        "{} ",
        ctx.text("Okudum ve kabul ediyorum [e/H]:", "I have read and accept [y/N]:")
    );

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(is_acceptance(&line))
}

/// Warning shown after a scan when the backend could not be reached.
pub fn offline_notice(state: &SessionState, language: Language) -> Option<&'static str> {
    if state.is_online {
        return None;
    }
    Some(match language {
        Language::Tr => "Analiz servisine ulaşılamadı; yeni kayıt oluşturulmadı",
        Language::En => "Analysis service unavailable; no new record was created",
    })
}

pub fn is_acceptance(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "e" | "evet" | "y" | "yes"
    )
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
