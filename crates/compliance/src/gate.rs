use std::{collections::BTreeMap, sync::Arc};

use tracing::{info, warn};
use umrs_shared::{
    AuditEvent, AuditEventKind, AuditSink, ComplianceContext, ComplianceError, SecurityLabel,
    SelinuxMode,
};

use crate::status::{is_strict_mode_value, read_status, StatusPaths};

/// Reads the host status sources. Detection is best-effort and never fails;
/// [`ComplianceGate::require_strict_crypto_mode`] is the one hard check.
pub struct ComplianceGate {
    paths: StatusPaths,
    audit: Arc<dyn AuditSink>,
}

impl ComplianceGate {
    pub fn new(paths: StatusPaths, audit: Arc<dyn AuditSink>) -> Self {
        Self { paths, audit }
    }

    pub fn paths(&self) -> &StatusPaths {
        &self.paths
    }

    pub fn detect_security_label(&self) -> Option<SecurityLabel> {
        match read_status(&self.paths.security_label) {
            Ok(raw) => SecurityLabel::parse(&raw),
            Err(err) => {
                warn!(
                    path = %self.paths.security_label.display(),
                    "security label unavailable: {err}"
                );
                None
            }
        }
    }

    /// A missing enforce file means SELinux is not mounted at all.
    pub fn selinux_mode(&self) -> SelinuxMode {
        match read_status(&self.paths.selinux_enforce) {
            Ok(raw) => match raw.trim() {
                "1" => SelinuxMode::Enforcing,
                "0" => SelinuxMode::Permissive,
                other => {
                    warn!(value = other, "unexpected selinux enforce value");
                    SelinuxMode::Disabled
                }
            },
            Err(_) => SelinuxMode::Disabled,
        }
    }

    pub fn require_strict_crypto_mode(&self) -> Result<(), ComplianceError> {
        let result = self.check_strict_crypto_mode();
        self.report_strict_check(&result);
        result
    }

    pub fn record_event(&self, kind: AuditEventKind, details: BTreeMap<String, String>) {
        self.audit.record(AuditEvent::with_details(kind, details));
    }

    /// Startup detection. Produces the context every window reads from.
    pub fn detect(&self) -> ComplianceContext {
        let strict = self.check_strict_crypto_mode();
        self.detect_with(strict.is_ok())
    }

    /// Detection plus the optional hard check, both decided by one read of
    /// the strict-crypto source.
    pub fn startup(&self, require_strict: bool) -> Result<ComplianceContext, ComplianceError> {
        let strict = self.check_strict_crypto_mode();
        let context = self.detect_with(strict.is_ok());
        if require_strict {
            self.report_strict_check(&strict);
            strict?;
        }
        Ok(context)
    }

    fn detect_with(&self, strict_mode_enabled: bool) -> ComplianceContext {
        let security_label = self.detect_security_label();
        let selinux_mode = self.selinux_mode();

        info!(
            label = security_label.as_ref().map(SecurityLabel::raw).unwrap_or("none"),
            strict_mode_enabled,
            selinux = selinux_mode.label(),
            "compliance context detected"
        );

        let mut details = BTreeMap::new();
        details.insert(
            "security_label".to_string(),
            security_label
                .as_ref()
                .map(|label| label.raw().to_string())
                .unwrap_or_else(|| "none".to_string()),
        );
        details.insert(
            "strict_mode_enabled".to_string(),
            strict_mode_enabled.to_string(),
        );
        details.insert("selinux_mode".to_string(), selinux_mode.label().to_string());
        self.record_event(AuditEventKind::ComplianceDetected, details);

        ComplianceContext::new(security_label, strict_mode_enabled, selinux_mode)
    }

    fn report_strict_check(&self, result: &Result<(), ComplianceError>) {
        let path = self.paths.fips_status.display().to_string();
        match result {
            Ok(()) => {
                info!("strict crypto mode verified");
                self.audit.record(
                    AuditEvent::new(AuditEventKind::StrictModeVerified).detail("path", path),
                );
            }
            Err(err) => {
                warn!("strict crypto mode check failed: {err}");
                self.audit.record(
                    AuditEvent::new(AuditEventKind::StrictModeViolation)
                        .detail("path", path)
                        .detail("reason", err.to_string()),
                );
            }
        }
    }

    fn check_strict_crypto_mode(&self) -> Result<(), ComplianceError> {
        let raw = read_status(&self.paths.fips_status).map_err(|source| {
            ComplianceError::StatusUnreadable {
                path: self.paths.fips_status.clone(),
                source,
            }
        })?;

        if is_strict_mode_value(&raw) {
            Ok(())
        } else {
            Err(ComplianceError::StrictModeDisabled {
                found: raw.trim().to_string(),
            })
        }
    }
}

#[cfg(test)]
#[path = "tests/gate_tests.rs"]
mod tests;
