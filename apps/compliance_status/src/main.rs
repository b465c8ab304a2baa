use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use umrs_compliance::{AuditSink, MemoryAuditSink, TeeAuditSink, TracingAuditSink};
use umrs_shell::{
    egui_shell::run_screen, RfdDialogPresenter, ShellContext, ShellSettings, WindowConfig,
};

mod app;

use app::{ComplianceStatusApp, RECENT_EVENT_LIMIT, WINDOW_TITLE};

#[derive(Parser, Debug)]
#[command(name = "umrs-compliance-status", about = "Show the host's UMRS compliance context")]
struct Args {
    /// Shell settings file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let mut settings =
        ShellSettings::load(args.config.as_deref()).context("failed to load shell settings")?;
    // This screen reports the state; it never gates on it.
    settings.require_strict_crypto = false;

    let recent = Arc::new(MemoryAuditSink::with_capacity(RECENT_EVENT_LIMIT));
    let audit = Arc::new(TeeAuditSink::new(vec![
        Arc::new(TracingAuditSink) as Arc<dyn AuditSink>,
        recent.clone() as Arc<dyn AuditSink>,
    ]));
    let shell = ShellContext::bootstrap(settings, audit, Arc::new(RfdDialogPresenter))
        .context("compliance status startup failed")?;

    run_screen(
        shell,
        WindowConfig::titled(WINDOW_TITLE),
        move |shell, window| ComplianceStatusApp::new(shell, window, recent),
    )
    .map_err(|err| anyhow!("compliance status window failed: {err}"))
}
