//! Tool launcher: looks a display name up in a [`ToolCatalog`] and starts the
//! matching command as an independent child process.

use std::sync::Arc;

use tracing::{debug, info, warn};
use umrs_shared::{AuditEvent, AuditEventKind, AuditSink, ToolId};

pub mod catalog;
pub mod spawner;

pub use catalog::{
    LaunchTarget, RuntimeLocation, ToolCatalog, ToolEntry, DEFAULT_SCRIPT_INTERPRETER,
};
pub use spawner::{ProcessSpawner, SystemSpawner};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    Launched { pid: u32 },
    NotInCatalog,
    Failed { reason: String },
}

impl LaunchOutcome {
    pub fn is_launched(&self) -> bool {
        matches!(self, LaunchOutcome::Launched { .. })
    }
}

pub struct ToolLauncher {
    catalog: ToolCatalog,
    spawner: Arc<dyn ProcessSpawner>,
    audit: Arc<dyn AuditSink>,
}

impl ToolLauncher {
    pub fn new(
        catalog: ToolCatalog,
        spawner: Arc<dyn ProcessSpawner>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            catalog,
            spawner,
            audit,
        }
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Unknown names are ignored; a rendered entry with no mapping spawns
    /// nothing. Each call spawns a fresh process, repeats included.
    pub fn activate(&self, display_name: &str) -> LaunchOutcome {
        match self.catalog.lookup(display_name) {
            Some(id) => self.launch(id),
            None => {
                debug!(tool = display_name, "activation for tool not in catalog");
                self.audit.record(
                    AuditEvent::new(AuditEventKind::ToolNotInCatalog).detail("tool", display_name),
                );
                LaunchOutcome::NotInCatalog
            }
        }
    }

    /// Collects tools that have exited since the last call.
    pub fn reap_finished(&self) -> usize {
        self.spawner.reap_finished()
    }

    pub fn launch(&self, id: ToolId) -> LaunchOutcome {
        let Some(entry) = self.catalog.get(id) else {
            return LaunchOutcome::NotInCatalog;
        };
        let command_line = entry.descriptor.command_line().join(" ");

        match self.spawner.spawn(&entry.descriptor) {
            Ok(pid) => {
                info!(tool = %entry.name, pid, command = %command_line, "tool launched");
                self.audit.record(
                    AuditEvent::new(AuditEventKind::ToolLaunched)
                        .detail("tool", entry.name.as_str())
                        .detail("pid", pid.to_string())
                        .detail("command", command_line),
                );
                LaunchOutcome::Launched { pid }
            }
            Err(err) => {
                warn!(tool = %entry.name, command = %command_line, "tool launch failed: {err}");
                let reason = format!("{}: {err}", entry.descriptor.program.display());
                self.audit.record(
                    AuditEvent::new(AuditEventKind::ToolLaunchFailed)
                        .detail("tool", entry.name.as_str())
                        .detail("command", command_line)
                        .detail("reason", reason.as_str()),
                );
                LaunchOutcome::Failed { reason }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/launcher_tests.rs"]
mod tests;
