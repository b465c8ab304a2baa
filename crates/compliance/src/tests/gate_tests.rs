use std::{fs, path::Path, sync::Arc};

use tempfile::TempDir;
use umrs_shared::{AuditEventKind, SelinuxMode};

use super::*;
use crate::MemoryAuditSink;

struct Host {
    dir: TempDir,
    audit: Arc<MemoryAuditSink>,
}

impl Host {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
            audit: Arc::new(MemoryAuditSink::new()),
        }
    }

    fn write(&self, name: &str, content: &str) {
        fs::write(self.dir.path().join(name), content).expect("write status");
    }

    fn path(&self, name: &str) -> std::path::PathBuf {
        self.dir.path().join(name)
    }

    fn gate(&self) -> ComplianceGate {
        ComplianceGate::new(
            StatusPaths {
                security_label: self.path("attr_current"),
                fips_status: self.path("fips_enabled"),
                selinux_enforce: self.path("enforce"),
            },
            self.audit.clone(),
        )
    }
}

#[test]
fn strict_mode_fails_when_source_missing() {
    let host = Host::new();
    let err = host.gate().require_strict_crypto_mode().expect_err("missing source");
    assert!(matches!(err, ComplianceError::StatusUnreadable { .. }));
    assert_eq!(host.audit.kinds(), vec![AuditEventKind::StrictModeViolation]);
}

#[test]
fn strict_mode_fails_on_zero() {
    let host = Host::new();
    host.write("fips_enabled", "0\n");
    let err = host.gate().require_strict_crypto_mode().expect_err("disabled");
    match err {
        ComplianceError::StrictModeDisabled { found } => assert_eq!(found, "0"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn strict_mode_passes_on_one() {
    let host = Host::new();
    host.write("fips_enabled", "1\n");
    host.gate().require_strict_crypto_mode().expect("enabled");
    assert_eq!(host.audit.kinds(), vec![AuditEventKind::StrictModeVerified]);
}

#[test]
fn strict_mode_rejects_other_strings() {
    let host = Host::new();
    for value in ["yes", "true", "2", "disabled", ""] {
        host.write("fips_enabled", value);
        assert!(
            host.gate().require_strict_crypto_mode().is_err(),
            "value {value:?} must not pass"
        );
    }
    host.write("fips_enabled", "enabled");
    assert!(host.gate().require_strict_crypto_mode().is_ok());
}

#[test]
fn security_label_missing_is_none() {
    let host = Host::new();
    assert!(host.gate().detect_security_label().is_none());
}

#[test]
fn security_label_is_read_and_trimmed() {
    let host = Host::new();
    host.write("attr_current", "unconfined_u:unconfined_r:unconfined_t:s0-s0:c0.c1023\0");
    let label = host.gate().detect_security_label().expect("label");
    assert_eq!(label.raw(), "unconfined_u:unconfined_r:unconfined_t:s0-s0:c0.c1023");
    assert_eq!(label.level(), Some("s0-s0:c0.c1023"));
}

#[test]
fn selinux_mode_follows_enforce_flag() {
    let host = Host::new();
    assert_eq!(host.gate().selinux_mode(), SelinuxMode::Disabled);
    host.write("enforce", "0");
    assert_eq!(host.gate().selinux_mode(), SelinuxMode::Permissive);
    host.write("enforce", "1\n");
    assert_eq!(host.gate().selinux_mode(), SelinuxMode::Enforcing);
}

#[test]
fn detect_builds_context_and_records_one_event() {
    let host = Host::new();
    host.write("attr_current", "staff_u:staff_r:staff_t:s0");
    host.write("fips_enabled", "1");
    host.write("enforce", "1");

    let context = host.gate().detect();
    assert!(context.strict_mode_enabled());
    assert_eq!(context.selinux_mode(), SelinuxMode::Enforcing);
    assert_eq!(context.security_label().map(|l| l.raw()), Some("staff_u:staff_r:staff_t:s0"));

    let events = host.audit.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, AuditEventKind::ComplianceDetected);
    assert_eq!(events[0].details["strict_mode_enabled"], "true");
    assert_eq!(events[0].details["selinux_mode"], "enforcing");
}

#[test]
fn detect_never_fails_on_bare_host() {
    let host = Host::new();
    let context = host.gate().detect();
    assert!(context.security_label().is_none());
    assert!(!context.strict_mode_enabled());
    assert_eq!(context.selinux_mode(), SelinuxMode::Disabled);
}

#[test]
fn record_event_forwards_details() {
    let host = Host::new();
    let mut details = std::collections::BTreeMap::new();
    details.insert("screen".to_string(), "audit-signing".to_string());
    host.gate().record_event(AuditEventKind::ActionInvoked, details);

    let events = host.audit.events();
    assert_eq!(events[0].kind, AuditEventKind::ActionInvoked);
    assert_eq!(events[0].details["screen"], "audit-signing");
    assert!(Path::new(&host.gate().paths().fips_status).ends_with("fips_enabled"));
}

#[test]
fn startup_required_and_enabled_reports_one_verified_check() {
    let host = Host::new();
    host.write("fips_enabled", "enabled\n");

    let context = host.gate().startup(true).expect("strict mode on");
    assert!(context.strict_mode_enabled());
    assert_eq!(
        host.audit.kinds(),
        vec![AuditEventKind::ComplianceDetected, AuditEventKind::StrictModeVerified]
    );
}

#[test]
fn startup_required_and_disabled_agrees_with_detected_context() {
    let host = Host::new();
    host.write("fips_enabled", "0");

    let err = host.gate().startup(true).expect_err("strict mode off");
    assert!(matches!(err, ComplianceError::StrictModeDisabled { ref found } if found == "0"));

    let events = host.audit.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].details["strict_mode_enabled"], "false");
    assert_eq!(events[1].kind, AuditEventKind::StrictModeViolation);
}

#[test]
fn startup_not_required_only_detects() {
    let host = Host::new();
    host.write("fips_enabled", "0");

    let context = host.gate().startup(false).expect("detection never fails");
    assert!(!context.strict_mode_enabled());
    assert_eq!(host.audit.kinds(), vec![AuditEventKind::ComplianceDetected]);
}

/// A FIFO yields its content to exactly one reader; a second open would
/// block with no writer left.
#[cfg(unix)]
#[test]
fn startup_reads_strict_source_once() {
    use std::{process::Command, sync::mpsc, thread, time::Duration};

    let host = Host::new();
    let fifo = host.path("fips_enabled");
    let made = Command::new("mkfifo").arg(&fifo).status().expect("mkfifo");
    assert!(made.success());

    let writer_path = fifo.clone();
    thread::spawn(move || {
        let _ = fs::write(writer_path, "1\n");
    });

    let gate = host.gate();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(gate.startup(true).map(|context| context.strict_mode_enabled()));
    });

    let outcome = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("startup read the strict-crypto source more than once");
    assert!(matches!(outcome, Ok(true)));
}
