use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;
use umrs_shell::{
    egui_shell::run_screen, DialogKind, DialogPresenter, MessageDialog, RfdDialogPresenter,
    ShellContext, ShellError, ShellSettings, WindowConfig,
};

mod app;

use app::{AuditSigningApp, WINDOW_TITLE};

#[derive(Parser, Debug)]
#[command(name = "umrs-audit-signing", about = "Sign rotated UMRS audit logs")]
struct Args {
    /// Shell settings file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Start even when strict crypto (FIPS) mode is off.
    #[arg(long)]
    allow_non_fips: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let mut settings =
        ShellSettings::load(args.config.as_deref()).context("failed to load shell settings")?;
    settings.require_strict_crypto = !args.allow_non_fips;

    let shell = match ShellContext::bootstrap_desktop(settings) {
        Ok(shell) => shell,
        Err(ShellError::Compliance(err)) => {
            error!("audit signing refused to start: {err}");
            RfdDialogPresenter.present(&MessageDialog {
                kind: DialogKind::Error,
                title: WINDOW_TITLE.to_string(),
                message: "Strict crypto mode is required".to_string(),
                secondary: Some(err.to_string()),
            });
            return Err(err).context("audit signing requires strict crypto mode");
        }
        Err(err) => return Err(err).context("audit signing startup failed"),
    };

    run_screen(shell, WindowConfig::titled(WINDOW_TITLE), AuditSigningApp::new)
        .map_err(|err| anyhow!("audit signing window failed: {err}"))
}
