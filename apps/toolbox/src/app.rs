//! Toolbox screen: one tile per catalog entry, a single click launches it.

use umrs_launcher::{LaunchOutcome, ToolLauncher};
use umrs_shell::{
    egui_shell::{begin_frame, compliance_footer, header},
    ShellContext, ShellWindow,
};

const TILE_SIZE: [f32; 2] = [120.0, 80.0];
const TILE_ICON: &str = "🧰";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBannerSeverity {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBanner {
    pub severity: StatusBannerSeverity,
    pub message: String,
}

pub struct ToolboxApp {
    shell: ShellContext,
    window: ShellWindow,
    launcher: ToolLauncher,
    status_banner: Option<StatusBanner>,
}

impl ToolboxApp {
    pub fn new(shell: ShellContext, window: ShellWindow, launcher: ToolLauncher) -> Self {
        Self {
            shell,
            window,
            launcher,
            status_banner: None,
        }
    }

    pub fn status_banner(&self) -> Option<&StatusBanner> {
        self.status_banner.as_ref()
    }

    /// Launch failures stay on screen until dismissed or replaced; nothing
    /// here is fatal.
    pub fn activate(&mut self, name: &str) {
        match self.launcher.activate(name) {
            LaunchOutcome::Launched { pid } => {
                self.status_banner = Some(StatusBanner {
                    severity: StatusBannerSeverity::Info,
                    message: format!("Started {name} (pid {pid})"),
                });
            }
            LaunchOutcome::NotInCatalog => {}
            LaunchOutcome::Failed { reason } => {
                self.status_banner = Some(StatusBanner {
                    severity: StatusBannerSeverity::Error,
                    message: format!("Could not start {name}: {reason}"),
                });
            }
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.status_banner.clone() else {
            return;
        };
        let (fill, stroke) = match banner.severity {
            StatusBannerSeverity::Info => (
                egui::Color32::from_rgb(27, 64, 27),
                egui::Stroke::new(1.0, egui::Color32::from_rgb(53, 95, 53)),
            ),
            StatusBannerSeverity::Error => (
                egui::Color32::from_rgb(111, 53, 53),
                egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
            ),
        };

        egui::Frame::NONE
            .fill(fill)
            .stroke(stroke)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.status_banner = None;
                        }
                    });
                });
            });
    }

    fn show_tiles(&mut self, ui: &mut egui::Ui) {
        let names: Vec<String> = self
            .launcher
            .catalog()
            .names()
            .map(str::to_string)
            .collect();

        let mut activated = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for name in &names {
                    let tile = egui::Button::new(format!("{TILE_ICON}\n{name}"));
                    if ui.add_sized(TILE_SIZE, tile).clicked() {
                        activated = Some(name.clone());
                    }
                }
            });
        });

        if let Some(name) = activated {
            self.activate(&name);
        }
    }
}

impl eframe::App for ToolboxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        begin_frame(&mut self.window, ctx);
        self.launcher.reap_finished();

        compliance_footer(ctx, self.shell.compliance());
        egui::CentralPanel::default().show(ctx, |ui| {
            header(ui, "UMRS Toolbox");
            ui.add_space(4.0);
            self.show_status_banner(ui);
            ui.add_space(4.0);
            self.show_tiles(ui);
        });
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
