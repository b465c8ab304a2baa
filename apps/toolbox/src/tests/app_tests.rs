use std::{
    io,
    sync::{Arc, Mutex},
};

use umrs_compliance::{MemoryAuditSink, StatusPaths};
use umrs_launcher::{ProcessSpawner, ToolCatalog};
use umrs_shared::{AuditEventKind, LaunchDescriptor};
use umrs_shell::{DialogPresenter, MessageDialog, ShellSettings, WindowConfig};

use super::*;

struct SilentPresenter;

impl DialogPresenter for SilentPresenter {
    fn present(&self, _dialog: &MessageDialog) {}
}

struct ScriptedSpawner {
    spawned: Arc<Mutex<Vec<Vec<String>>>>,
}

impl ProcessSpawner for ScriptedSpawner {
    fn spawn(&self, descriptor: &LaunchDescriptor) -> io::Result<u32> {
        if descriptor.program.to_string_lossy().contains("missing") {
            return Err(io::Error::new(io::ErrorKind::NotFound, "not found"));
        }
        self.spawned
            .lock()
            .expect("spawned")
            .push(descriptor.command_line());
        Ok(77)
    }
}

struct Fixture {
    _dir: tempfile::TempDir,
    app: ToolboxApp,
    spawned: Arc<Mutex<Vec<Vec<String>>>>,
    audit: Arc<MemoryAuditSink>,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = ShellSettings {
        status_paths: StatusPaths {
            security_label: dir.path().join("current"),
            fips_status: dir.path().join("fips_enabled"),
            selinux_enforce: dir.path().join("enforce"),
        },
        ..ShellSettings::default()
    };
    let audit = Arc::new(MemoryAuditSink::new());
    let shell = ShellContext::bootstrap(settings, audit.clone(), Arc::new(SilentPresenter))
        .expect("shell");

    let spawned = Arc::new(Mutex::new(Vec::new()));
    let catalog = ToolCatalog::new([
        (
            "Script One",
            LaunchDescriptor::new("python3").arg("/a/script_one.py"),
        ),
        (
            "Script Two",
            LaunchDescriptor::new("python3").arg("/a/script_two.py"),
        ),
        ("Broken", LaunchDescriptor::new("/missing/tool")),
    ])
    .expect("catalog");
    let launcher = ToolLauncher::new(
        catalog,
        Arc::new(ScriptedSpawner {
            spawned: spawned.clone(),
        }),
        shell.audit().clone(),
    );

    let window = ShellWindow::new(&shell, &WindowConfig::titled("UMRS Toolbox"), None);
    Fixture {
        _dir: dir,
        app: ToolboxApp::new(shell, window, launcher),
        spawned,
        audit,
    }
}

#[test]
fn selecting_a_tile_spawns_its_command() {
    let mut fx = fixture();

    fx.app.activate("Script Two");

    assert_eq!(
        *fx.spawned.lock().expect("spawned"),
        vec![vec!["python3".to_string(), "/a/script_two.py".to_string()]]
    );
    let banner = fx.app.status_banner().expect("banner");
    assert_eq!(banner.severity, StatusBannerSeverity::Info);
    assert_eq!(banner.message, "Started Script Two (pid 77)");
}

#[test]
fn failed_spawn_shows_error_banner() {
    let mut fx = fixture();

    fx.app.activate("Broken");

    let banner = fx.app.status_banner().expect("banner");
    assert_eq!(banner.severity, StatusBannerSeverity::Error);
    assert!(banner.message.starts_with("Could not start Broken"));
    assert!(fx.audit.kinds().contains(&AuditEventKind::ToolLaunchFailed));
}

#[test]
fn unmapped_name_changes_nothing() {
    let mut fx = fixture();

    fx.app.activate("Stale Entry");

    assert!(fx.spawned.lock().expect("spawned").is_empty());
    assert!(fx.app.status_banner().is_none());
}
