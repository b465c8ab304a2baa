//! Audit event shapes and the sink seam.
//!
//! Events describe what the shell did. They carry no presentation details;
//! rendering belongs to whichever sink receives them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventKind {
    ComplianceDetected,
    StrictModeVerified,
    StrictModeViolation,
    ThemeUnavailable,
    ToolLaunched,
    ToolLaunchFailed,
    ToolNotInCatalog,
    DialogPresented,
    WindowClosed,
    ActionInvoked,
}

impl AuditEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditEventKind::ComplianceDetected => "compliance_detected",
            AuditEventKind::StrictModeVerified => "strict_mode_verified",
            AuditEventKind::StrictModeViolation => "strict_mode_violation",
            AuditEventKind::ThemeUnavailable => "theme_unavailable",
            AuditEventKind::ToolLaunched => "tool_launched",
            AuditEventKind::ToolLaunchFailed => "tool_launch_failed",
            AuditEventKind::ToolNotInCatalog => "tool_not_in_catalog",
            AuditEventKind::DialogPresented => "dialog_presented",
            AuditEventKind::WindowClosed => "window_closed",
            AuditEventKind::ActionInvoked => "action_invoked",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub kind: AuditEventKind,
    pub details: BTreeMap<String, String>,
    pub recorded_at: DateTime<Utc>,
}

impl AuditEvent {
    pub fn new(kind: AuditEventKind) -> Self {
        Self {
            kind,
            details: BTreeMap::new(),
            recorded_at: Utc::now(),
        }
    }

    pub fn with_details(kind: AuditEventKind, details: BTreeMap<String, String>) -> Self {
        Self {
            kind,
            details,
            recorded_at: Utc::now(),
        }
    }

    pub fn detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Single-line JSON rendering for line-oriented sinks.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Receiver of audit events. The hosting application decides where they go.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: AuditEvent);
}
