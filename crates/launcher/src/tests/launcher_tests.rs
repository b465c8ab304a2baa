use std::{
    io,
    sync::{Arc, Mutex},
};

use umrs_compliance::MemoryAuditSink;
use umrs_shared::LaunchDescriptor;

use super::*;

/// Records every spawn into a shared call log.
struct RecordingSpawner {
    log: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingSpawner {
    fn new(log: Arc<Mutex<Vec<String>>>) -> Self {
        Self { log, fail: false }
    }
}

impl ProcessSpawner for RecordingSpawner {
    fn spawn(&self, descriptor: &LaunchDescriptor) -> io::Result<u32> {
        self.log
            .lock()
            .expect("log")
            .push(format!("spawn {}", descriptor.command_line().join(" ")));
        if self.fail {
            Err(io::Error::new(io::ErrorKind::NotFound, "no such file"))
        } else {
            Ok(4242)
        }
    }
}

fn scripts_catalog() -> ToolCatalog {
    ToolCatalog::new([
        (
            "Script One",
            LaunchDescriptor::new("python3").arg("/a/script_one.py"),
        ),
        (
            "Script Two",
            LaunchDescriptor::new("python3").arg("/a/script_two.py"),
        ),
    ])
    .expect("catalog")
}

fn launcher(fail: bool) -> (ToolLauncher, Arc<Mutex<Vec<String>>>, Arc<MemoryAuditSink>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let audit = Arc::new(MemoryAuditSink::new());
    let spawner = RecordingSpawner {
        fail,
        ..RecordingSpawner::new(log.clone())
    };
    let launcher = ToolLauncher::new(scripts_catalog(), Arc::new(spawner), audit.clone());
    (launcher, log, audit)
}

#[test]
fn activate_spawns_exact_recorded_command() {
    let (launcher, log, audit) = launcher(false);

    let outcome = launcher.activate("Script Two");

    assert_eq!(outcome, LaunchOutcome::Launched { pid: 4242 });
    assert_eq!(
        *log.lock().expect("log"),
        vec!["spawn python3 /a/script_two.py".to_string()]
    );
    let events = audit.events();
    assert_eq!(events[0].kind, AuditEventKind::ToolLaunched);
    assert_eq!(events[0].details["tool"], "Script Two");
    assert_eq!(events[0].details["pid"], "4242");
}

#[test]
fn unknown_name_is_a_noop() {
    let (launcher, log, audit) = launcher(false);

    assert_eq!(launcher.activate("Script Three"), LaunchOutcome::NotInCatalog);
    assert!(log.lock().expect("log").is_empty());
    assert_eq!(audit.kinds(), vec![AuditEventKind::ToolNotInCatalog]);
}

#[test]
fn activate_returns_before_anything_else_happens() {
    let (launcher, log, _audit) = launcher(false);

    launcher.activate("Script One");
    log.lock().expect("log").push("activate returned".to_string());

    assert_eq!(
        *log.lock().expect("log"),
        vec![
            "spawn python3 /a/script_one.py".to_string(),
            "activate returned".to_string()
        ]
    );
}

#[test]
fn double_activation_spawns_twice() {
    let (launcher, log, _audit) = launcher(false);

    assert!(launcher.activate("Script One").is_launched());
    assert!(launcher.activate("Script One").is_launched());
    assert_eq!(log.lock().expect("log").len(), 2);
}

#[test]
fn spawn_failure_is_reported_not_raised() {
    let (launcher, _log, audit) = launcher(true);

    match launcher.activate("Script One") {
        LaunchOutcome::Failed { reason } => assert!(reason.contains("no such file")),
        other => panic!("unexpected outcome: {other:?}"),
    }
    let events = audit.events();
    assert_eq!(events[0].kind, AuditEventKind::ToolLaunchFailed);
    assert_eq!(events[0].details["command"], "python3 /a/script_one.py");
}

#[test]
fn launch_by_stale_id_is_a_noop() {
    let (launcher, log, _audit) = launcher(false);
    assert_eq!(launcher.launch(ToolId(99)), LaunchOutcome::NotInCatalog);
    assert!(log.lock().expect("log").is_empty());
}
