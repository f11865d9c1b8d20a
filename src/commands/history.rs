//! `history`, `show` and `export`: reading stored analyses back.

use super::{render_view, AppContext};
use crate::api::AnalysisService;
use crate::cli::OutputFormat;
use crate::core::AnalysisRecord;
use crate::io;
use crate::report::{render_history, HtmlReportWriter, ResultsView};
use crate::session::SessionFlow;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub async fn handle_history<S: AnalysisService>(
    ctx: &AppContext,
    service: &S,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let limit = limit.unwrap_or(ctx.config.service.history_limit);
    let spinner = ctx
        .progress
        .create_spinner(ctx.text("Analizler yükleniyor...", "Loading analyses..."));
    let records = service.list_analyses(limit).await;
    spinner.finish_and_clear();
    let records = records.context(ctx.text(
        "Analiz geçmişi alınamadı",
        "Could not load analysis history",
    ))?;
    tracing::debug!(count = records.len(), "history loaded");

    let out = match format {
        OutputFormat::Terminal => render_history(&records, ctx.formatter.as_ref(), ctx.language),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&records)?;
            json.push('\n');
            json
        }
        OutputFormat::Html => anyhow::bail!(ctx.text(
            "Geçmiş için HTML çıktısı yok; tek bir analiz için `export` kullanın",
            "History has no HTML output; use `export` for a single analysis",
        )),
    };
    io::emit(None, &out)
}

async fn fetch<S: AnalysisService>(ctx: &AppContext, service: &S, id: &str) -> Result<AnalysisRecord> {
    let spinner = ctx
        .progress
        .create_spinner(ctx.text("Analiz yükleniyor...", "Loading analysis..."));
    let record = service.get_analysis(id).await;
    spinner.finish_and_clear();
    record.with_context(|| format!("{} '{}'", ctx.text("Analiz alınamadı", "Could not load analysis"), id))
}

/// Selecting a history entry: the fetched record becomes the session's
/// current analysis and is shown on the results step.
pub async fn handle_show<S: AnalysisService>(
    ctx: &AppContext,
    service: &S,
    id: &str,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let record = fetch(ctx, service, id).await?;
    let mut flow = SessionFlow::new(ctx.language);
    flow.open_analysis(record);
    let out = render_view(ctx, &ResultsView::from_state(flow.state()), format)?;
    io::emit(output, &out)
}

pub async fn handle_export<S: AnalysisService>(
    ctx: &AppContext,
    service: &S,
    id: &str,
    output: &Path,
) -> Result<()> {
    let record = fetch(ctx, service, id).await?;
    export_report(ctx, &record, output)?;
    println!(
        "{} {}",
        ctx.formatter
            .success(ctx.text("Rapor kaydedildi:", "Report saved:")),
        output.display()
    );
    Ok(())
}

pub fn export_report(ctx: &AppContext, record: &AnalysisRecord, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        io::ensure_dir(parent)?;
    }
    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let mut writer = HtmlReportWriter::new(BufWriter::new(file), ctx.language);
    writer.write_report(record)?;
    tracing::info!(id = %record.id, path = %output.display(), "report exported");
    Ok(())
}
