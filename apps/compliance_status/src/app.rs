//! Read-only view of the compliance context detected at startup, with an
//! on-demand strict-crypto re-check.

use std::sync::Arc;

use umrs_compliance::MemoryAuditSink;
use umrs_shared::ComplianceContext;
use umrs_shell::{
    egui_shell::{begin_frame, compliance_footer, header, primary_button, section_title},
    ShellCapability, ShellContext, ShellWindow,
};

pub const WINDOW_TITLE: &str = "UMRS Compliance Status";
pub const RECENT_EVENT_LIMIT: usize = 20;

pub struct ComplianceStatusApp {
    shell: ShellContext,
    window: ShellWindow,
    recent: Arc<MemoryAuditSink>,
}

/// Label/value pairs shown in the status grid.
pub fn status_rows(compliance: &ComplianceContext) -> Vec<(&'static str, String)> {
    let mut rows = Vec::new();
    match compliance.security_label() {
        Some(label) => {
            rows.push(("Security label", label.raw().to_string()));
            if let Some(parts) = label.parts() {
                rows.push(("User", parts.user.clone()));
                rows.push(("Role", parts.role.clone()));
                rows.push(("Type", parts.security_type.clone()));
                rows.push((
                    "Level",
                    parts.level.clone().unwrap_or_else(|| "-".to_string()),
                ));
            }
        }
        None => rows.push(("Security label", "unavailable".to_string())),
    }
    rows.push(("SELinux", compliance.selinux_mode().label().to_string()));
    rows.push((
        "Strict crypto",
        if compliance.strict_mode_enabled() {
            "enabled".to_string()
        } else {
            "not enabled".to_string()
        },
    ));
    rows
}

impl ComplianceStatusApp {
    pub fn new(shell: ShellContext, window: ShellWindow, recent: Arc<MemoryAuditSink>) -> Self {
        Self {
            shell,
            window,
            recent,
        }
    }

    pub fn on_recheck_clicked(&mut self) {
        self.window.record_action("recheck_strict_crypto");
        let path = self.shell.gate().paths().fips_status.display().to_string();
        match self.shell.gate().require_strict_crypto_mode() {
            Ok(()) => self
                .window
                .show_info("Strict crypto mode is enabled", Some(&path)),
            Err(err) => self
                .window
                .show_error("Strict crypto mode check failed", Some(&err.to_string())),
        }
    }

    fn show_status_grid(&self, ui: &mut egui::Ui) {
        egui::Grid::new("umrs_compliance_grid")
            .num_columns(2)
            .spacing([16.0, 6.0])
            .striped(true)
            .show(ui, |ui| {
                for (label, value) in status_rows(self.shell.compliance()) {
                    ui.label(label);
                    ui.monospace(value);
                    ui.end_row();
                }
            });
    }

    fn show_recent_events(&self, ui: &mut egui::Ui) {
        let events = self.recent.recent(RECENT_EVENT_LIMIT);
        egui::ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
            for event in &events {
                ui.monospace(format!(
                    "{} {}",
                    event.recorded_at.format("%H:%M:%S"),
                    event.kind.as_str()
                ));
            }
        });
    }
}

impl eframe::App for ComplianceStatusApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        begin_frame(&mut self.window, ctx);

        compliance_footer(ctx, self.shell.compliance());
        egui::CentralPanel::default().show(ctx, |ui| {
            header(ui, "Compliance Status");
            ui.add_space(8.0);
            self.show_status_grid(ui);
            ui.add_space(8.0);
            if primary_button(ui, "Re-check strict mode").clicked() {
                self.on_recheck_clicked();
            }
            ui.add_space(12.0);
            section_title(ui, "Recent audit events");
            self.show_recent_events(ui);
        });
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
