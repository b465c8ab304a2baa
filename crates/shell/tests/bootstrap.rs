use std::{fs, sync::Arc};

use umrs_compliance::{AuditEventKind, MemoryAuditSink, StatusPaths};
use umrs_shared::{ComplianceError, SelinuxMode};
use umrs_shell::{DialogPresenter, MessageDialog, ShellContext, ShellError, ShellSettings};

struct SilentPresenter;

impl DialogPresenter for SilentPresenter {
    fn present(&self, _dialog: &MessageDialog) {}
}

fn settings_in(dir: &tempfile::TempDir, require_strict_crypto: bool) -> ShellSettings {
    ShellSettings {
        status_paths: StatusPaths {
            security_label: dir.path().join("current"),
            fips_status: dir.path().join("fips_enabled"),
            selinux_enforce: dir.path().join("enforce"),
        },
        require_strict_crypto,
        ..ShellSettings::default()
    }
}

#[test]
fn strict_startup_aborts_without_fips() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("fips_enabled"), "0\n").expect("write");
    let audit = Arc::new(MemoryAuditSink::new());

    let result = ShellContext::bootstrap(
        settings_in(&dir, true),
        audit.clone(),
        Arc::new(SilentPresenter),
    );

    assert!(matches!(
        result,
        Err(ShellError::Compliance(ComplianceError::StrictModeDisabled { .. }))
    ));
    assert_eq!(
        audit.kinds(),
        vec![
            AuditEventKind::ComplianceDetected,
            AuditEventKind::StrictModeViolation
        ]
    );
}

#[test]
fn relaxed_startup_records_context_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("current"), "user_u:user_r:user_t:s0\n").expect("write");
    fs::write(dir.path().join("enforce"), "0").expect("write");
    let audit = Arc::new(MemoryAuditSink::new());

    let shell = ShellContext::bootstrap(
        settings_in(&dir, false),
        audit.clone(),
        Arc::new(SilentPresenter),
    )
    .expect("shell");

    let compliance = shell.compliance();
    assert_eq!(
        compliance.security_label().map(|label| label.raw()),
        Some("user_u:user_r:user_t:s0")
    );
    assert!(!compliance.strict_mode_enabled());
    assert_eq!(compliance.selinux_mode(), SelinuxMode::Permissive);
    assert_eq!(audit.kinds(), vec![AuditEventKind::ComplianceDetected]);
    assert!(!shell.theme().is_loaded());
}

#[test]
fn strict_startup_passes_with_fips() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("fips_enabled"), "1\n").expect("write");

    let shell = ShellContext::bootstrap(
        settings_in(&dir, true),
        Arc::new(MemoryAuditSink::new()),
        Arc::new(SilentPresenter),
    )
    .expect("shell");
    assert!(shell.compliance().strict_mode_enabled());
}
