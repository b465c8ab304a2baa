use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use umrs_launcher::{RuntimeLocation, SystemSpawner, ToolCatalog, ToolLauncher};
use umrs_shell::{egui_shell::run_screen, ShellContext, ShellSettings, WindowConfig};

mod app;

use app::ToolboxApp;

#[derive(Parser, Debug)]
#[command(name = "umrs-toolbox", about = "Grid launcher for UMRS tools")]
struct Args {
    /// Shell settings file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Refuse to start unless strict crypto (FIPS) mode is on.
    #[arg(long)]
    require_fips: bool,
    /// Directory holding the script tools.
    #[arg(long)]
    tools_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let mut settings =
        ShellSettings::load(args.config.as_deref()).context("failed to load shell settings")?;
    if args.require_fips {
        settings.require_strict_crypto = true;
    }
    if args.tools_dir.is_some() {
        settings.tools_dir = args.tools_dir;
    }

    let shell = ShellContext::bootstrap_desktop(settings).context("toolbox startup refused")?;

    let runtime = RuntimeLocation::current(
        Some(shell.settings().script_interpreter.clone()),
        shell.settings().tools_dir.clone(),
    );
    let catalog = ToolCatalog::builtin(&runtime).context("invalid built-in tool catalog")?;
    let launcher = ToolLauncher::new(
        catalog,
        Arc::new(SystemSpawner::new()),
        shell.audit().clone(),
    );

    let config = WindowConfig::titled("UMRS Toolbox").with_default_size(400, 300);
    run_screen(shell, config, move |shell, window| {
        ToolboxApp::new(shell, window, launcher)
    })
    .map_err(|err| anyhow!("toolbox window failed: {err}"))
}
