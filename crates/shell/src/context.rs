use std::sync::Arc;

use tracing::info;
use umrs_compliance::{ComplianceGate, TracingAuditSink};
use umrs_shared::{AuditSink, ComplianceContext};

use crate::{
    dialog::{DialogPresenter, RfdDialogPresenter},
    error::ShellError,
    settings::ShellSettings,
    theme::ThemeManager,
};

/// Process-wide shell state, built once by the entry point and handed to
/// every window it creates.
pub struct ShellContext {
    settings: ShellSettings,
    theme: ThemeManager,
    gate: ComplianceGate,
    compliance: ComplianceContext,
    audit: Arc<dyn AuditSink>,
    dialogs: Arc<dyn DialogPresenter>,
}

impl ShellContext {
    /// Runs compliance detection. With `require_strict_crypto` set, a host
    /// without strict crypto mode stops startup here.
    pub fn bootstrap(
        settings: ShellSettings,
        audit: Arc<dyn AuditSink>,
        dialogs: Arc<dyn DialogPresenter>,
    ) -> Result<Self, ShellError> {
        let gate = ComplianceGate::new(settings.status_paths.clone(), audit.clone());
        let compliance = gate.startup(settings.require_strict_crypto)?;
        info!(
            strict_required = settings.require_strict_crypto,
            "shell context ready"
        );

        Ok(Self {
            settings,
            theme: ThemeManager::default(),
            gate,
            compliance,
            audit,
            dialogs,
        })
    }

    /// Native dialogs and tracing-backed audit events.
    pub fn bootstrap_desktop(settings: ShellSettings) -> Result<Self, ShellError> {
        Self::bootstrap(
            settings,
            Arc::new(TracingAuditSink),
            Arc::new(RfdDialogPresenter),
        )
    }

    pub fn settings(&self) -> &ShellSettings {
        &self.settings
    }

    pub fn theme(&self) -> &ThemeManager {
        &self.theme
    }

    pub fn gate(&self) -> &ComplianceGate {
        &self.gate
    }

    pub fn compliance(&self) -> &ComplianceContext {
        &self.compliance
    }

    pub fn audit(&self) -> &Arc<dyn AuditSink> {
        &self.audit
    }

    pub fn dialogs(&self) -> &Arc<dyn DialogPresenter> {
        &self.dialogs
    }
}
