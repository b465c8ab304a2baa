//! egui/eframe adapter: the style target, window options derived from a
//! [`WindowConfig`], close handling and the styled widgets screens use.

use std::sync::Arc;

use umrs_shared::ComplianceContext;

use crate::{
    context::ShellContext,
    theme::{
        Rgb, StylePriority, StyleRule, StyleSheet, StyleTarget, ACCENT_CLASS, BUTTON_CLASS,
        HEADER_CLASS, MAIN_WINDOW_CLASS, PRIMARY_ACTION_CLASS, SECTION_TITLE_CLASS,
    },
    window::{CloseDecision, ShellCapability, ShellWindow, WindowConfig},
};

const SHEET_DATA_KEY: &str = "umrs.style_sheet";

fn color(rgb: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

/// An egui context acting as the default display.
pub struct EguiStyleTarget<'a> {
    ctx: &'a egui::Context,
}

impl<'a> EguiStyleTarget<'a> {
    pub fn new(ctx: &'a egui::Context) -> Self {
        Self { ctx }
    }
}

impl StyleTarget for EguiStyleTarget<'_> {
    fn register_style_sheet(&self, sheet: &StyleSheet, priority: StylePriority) {
        tracing::debug!(?priority, "registering style sheet with egui context");
        let mut style = (*self.ctx.style()).clone();
        style.visuals = visuals_for_sheet(sheet);
        style.spacing.item_spacing = egui::vec2(8.0, 8.0);
        style.spacing.button_padding = egui::vec2(10.0, 6.0);
        self.ctx.set_style(style);
        self.ctx.data_mut(|data| {
            data.insert_temp(egui::Id::new(SHEET_DATA_KEY), Arc::new(sheet.clone()))
        });
    }

    fn apply_window_class(&self, class: &str) {
        let Some(rule) = registered_rule(self.ctx, class) else {
            return;
        };
        self.ctx.style_mut(|style| {
            if let Some(bg) = rule.background {
                style.visuals.panel_fill = color(bg);
                style.visuals.window_fill = color(bg);
            }
            if let Some(fg) = rule.foreground {
                style.visuals.override_text_color = Some(color(fg));
            }
        });
    }
}

pub fn visuals_for_sheet(sheet: &StyleSheet) -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();

    if let Some(window) = sheet.rule(MAIN_WINDOW_CLASS) {
        if let Some(bg) = window.background {
            visuals.window_fill = color(bg);
            visuals.panel_fill = color(bg);
            visuals.extreme_bg_color = color(bg).gamma_multiply(0.8);
        }
        visuals.override_text_color = window.foreground.map(color);
    }

    if let Some(button) = sheet.rule(BUTTON_CLASS) {
        if let Some(bg) = button.background {
            visuals.widgets.inactive.weak_bg_fill = color(bg);
            visuals.widgets.inactive.bg_fill = color(bg);
        }
        if let Some(hover) = button.hover_background {
            visuals.widgets.hovered.weak_bg_fill = color(hover);
            visuals.widgets.hovered.bg_fill = color(hover);
        }
        if let Some(border) = button.border {
            visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, color(border));
            visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, color(border));
        }
    }

    if let Some(accent) = sheet.rule(ACCENT_CLASS).and_then(|rule| rule.foreground) {
        visuals.hyperlink_color = color(accent);
        visuals.selection.bg_fill = color(accent).gamma_multiply(0.5);
        visuals.selection.stroke = egui::Stroke::new(1.0, color(accent));
    }

    visuals
}

/// The registered sheet's rule for `class`, falling back to the built-in
/// sheet when nothing was registered with this context.
pub fn registered_rule(ctx: &egui::Context, class: &str) -> Option<StyleRule> {
    let sheet = ctx
        .data(|data| data.get_temp::<Arc<StyleSheet>>(egui::Id::new(SHEET_DATA_KEY)))
        .unwrap_or_else(|| Arc::new(StyleSheet::umrs()));
    sheet.rule(class).copied()
}

pub fn native_options(config: &WindowConfig) -> eframe::NativeOptions {
    let size = config.default_size;
    let min = config.effective_min_size();
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.title_or_default())
            .with_inner_size([size.width as f32, size.height as f32])
            .with_min_inner_size([min.width as f32, min.height as f32]),
        centered: true,
        ..Default::default()
    }
}

/// Opens one screen in its own native window and runs the event loop until
/// the window closes. `build` receives the shell context and the window
/// already attached to the display.
pub fn run_screen<A, F>(shell: ShellContext, config: WindowConfig, build: F) -> eframe::Result<()>
where
    A: eframe::App + 'static,
    F: FnOnce(ShellContext, ShellWindow) -> A + 'static,
{
    let options = native_options(&config);
    let app_name = config.title_or_default().to_string();
    eframe::run_native(
        &app_name,
        options,
        Box::new(move |cc| {
            let display = EguiStyleTarget::new(&cc.egui_ctx);
            let window = ShellWindow::new(&shell, &config, Some(&display));
            let app: Box<dyn eframe::App> = Box::new(build(shell, window));
            Ok(app)
        }),
    )
}

/// Per-frame bookkeeping every screen calls first in `update`.
pub fn begin_frame(window: &mut ShellWindow, ctx: &egui::Context) {
    window.mark_visible();
    if ctx.input(|i| i.viewport().close_requested())
        && window.on_close_requested() == CloseDecision::Keep
    {
        ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
    }
}

fn styled_text(ctx: &egui::Context, class: &str, text: &str) -> egui::RichText {
    let mut rich = egui::RichText::new(text);
    if let Some(rule) = registered_rule(ctx, class) {
        if let Some(fg) = rule.foreground {
            rich = rich.color(color(fg));
        }
        if rule.bold {
            rich = rich.strong();
        }
    }
    rich
}

pub fn header(ui: &mut egui::Ui, text: &str) -> egui::Response {
    let rich = styled_text(ui.ctx(), HEADER_CLASS, text).heading();
    ui.label(rich)
}

pub fn section_title(ui: &mut egui::Ui, text: &str) -> egui::Response {
    let rich = styled_text(ui.ctx(), SECTION_TITLE_CLASS, text);
    ui.label(rich)
}

pub fn accent_label(ui: &mut egui::Ui, text: &str) -> egui::Response {
    let rich = styled_text(ui.ctx(), ACCENT_CLASS, text);
    ui.label(rich)
}

pub fn primary_button(ui: &mut egui::Ui, text: &str) -> egui::Response {
    let rule = registered_rule(ui.ctx(), PRIMARY_ACTION_CLASS).unwrap_or_default();
    let label = styled_text(ui.ctx(), PRIMARY_ACTION_CLASS, text);
    ui.scope(|ui| {
        let widgets = &mut ui.visuals_mut().widgets;
        if let Some(bg) = rule.background {
            widgets.inactive.weak_bg_fill = color(bg);
        }
        if let Some(hover) = rule.hover_background {
            widgets.hovered.weak_bg_fill = color(hover);
            widgets.active.weak_bg_fill = color(hover);
        }
        ui.button(label)
    })
    .inner
}

/// One-line compliance indicator for a window footer.
pub fn compliance_summary(compliance: &ComplianceContext) -> String {
    let label = compliance
        .security_label()
        .map(|label| label.raw().to_string())
        .unwrap_or_else(|| "unlabeled".to_string());
    let crypto = if compliance.strict_mode_enabled() {
        "FIPS on"
    } else {
        "FIPS off"
    };
    format!(
        "{label} | SELinux {} | {crypto}",
        compliance.selinux_mode().label()
    )
}

pub fn compliance_footer(ctx: &egui::Context, compliance: &ComplianceContext) {
    egui::TopBottomPanel::bottom("umrs_compliance_footer").show(ctx, |ui| {
        accent_label(ui, &compliance_summary(compliance));
    });
}

#[cfg(test)]
#[path = "tests/egui_shell_tests.rs"]
mod tests;
