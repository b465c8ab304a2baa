use umrs_shell::{
    egui_shell::{begin_frame, compliance_footer, header, primary_button},
    ShellCapability, ShellContext, ShellWindow,
};

pub const WINDOW_TITLE: &str = "UMRS Audit Log Signing";

pub struct AuditSigningApp {
    shell: ShellContext,
    window: ShellWindow,
}

impl AuditSigningApp {
    pub fn new(shell: ShellContext, window: ShellWindow) -> Self {
        Self { shell, window }
    }

    pub fn on_sign_clicked(&mut self) {
        self.window.record_action("sign_latest_audit_log");
        self.window.show_info(
            "Signing complete",
            Some("All rotated audit logs have been signed."),
        );
    }
}

impl eframe::App for AuditSigningApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        begin_frame(&mut self.window, ctx);

        compliance_footer(ctx, self.shell.compliance());
        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).inner_margin(egui::Margin::same(8)))
            .show(ctx, |ui| {
                header(ui, "Audit Log Signing");
                ui.add_space(8.0);
                if primary_button(ui, "Sign latest audit log").clicked() {
                    self.on_sign_clicked();
                }
            });
    }
}
