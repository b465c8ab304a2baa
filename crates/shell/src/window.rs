//! Shell window contract shared by every screen.
//!
//! Screens hold a [`ShellWindow`] instead of extending a toolkit window. It
//! owns the lifecycle
//! `Constructed -> Visible -> (dialog cycles) -> Closing -> Destroyed`
//! and is the only way a screen shows dialogs or reacts to close requests.

use std::sync::Arc;

use tracing::{debug, info, warn};
use umrs_shared::{AuditEvent, AuditEventKind, AuditSink};

use crate::{
    context::ShellContext,
    dialog::{DialogKind, DialogPresenter, MessageDialog},
    theme::{StyleTarget, MAIN_WINDOW_CLASS},
};

pub const DEFAULT_TITLE: &str = "UMRS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: Option<String>,
    pub min_size: WindowSize,
    pub default_size: WindowSize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: None,
            min_size: WindowSize::new(800, 480),
            default_size: WindowSize::new(1024, 640),
        }
    }
}

impl WindowConfig {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_default_size(mut self, width: u32, height: u32) -> Self {
        self.default_size = WindowSize::new(width, height);
        self
    }

    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    /// The minimum never exceeds the default extent.
    pub fn effective_min_size(&self) -> WindowSize {
        WindowSize::new(
            self.min_size.width.min(self.default_size.width),
            self.min_size.height.min(self.default_size.height),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Constructed,
    Visible,
    Closing,
    Destroyed,
}

/// Answer of a close-request hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    Allow,
    Keep,
}

/// What a screen needs from its window.
pub trait ShellCapability {
    fn apply_shell_style(&self, display: &dyn StyleTarget);
    fn show_error(&mut self, message: &str, secondary: Option<&str>);
    fn show_info(&mut self, message: &str, secondary: Option<&str>);
    fn on_close_requested(&mut self) -> CloseDecision;
}

type CloseHook = Box<dyn FnMut() -> CloseDecision>;

pub struct ShellWindow {
    title: String,
    state: WindowState,
    dialogs: Arc<dyn DialogPresenter>,
    audit: Arc<dyn AuditSink>,
    close_hook: CloseHook,
    dialog_cycles: usize,
    close_requests: usize,
}

impl ShellWindow {
    /// Loads the theme (once per context) before tagging the window with the
    /// main-window style class. A missing display is not an error.
    pub fn new(
        shell: &ShellContext,
        config: &WindowConfig,
        display: Option<&dyn StyleTarget>,
    ) -> Self {
        shell.theme().ensure_loaded(display, shell.audit().as_ref());

        let window = Self {
            title: config.title_or_default().to_string(),
            state: WindowState::Constructed,
            dialogs: shell.dialogs().clone(),
            audit: shell.audit().clone(),
            close_hook: Box::new(|| CloseDecision::Allow),
            dialog_cycles: 0,
            close_requests: 0,
        };
        if let Some(display) = display {
            window.apply_shell_style(display);
        }
        debug!(title = %window.title, "shell window constructed");
        window
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn dialog_cycles(&self) -> usize {
        self.dialog_cycles
    }

    pub fn close_requests(&self) -> usize {
        self.close_requests
    }

    /// Replaces the default hook, which always allows the close.
    pub fn set_close_hook(&mut self, hook: impl FnMut() -> CloseDecision + 'static) {
        self.close_hook = Box::new(hook);
    }

    pub fn mark_visible(&mut self) {
        if self.state == WindowState::Constructed {
            self.state = WindowState::Visible;
            debug!(title = %self.title, "shell window visible");
        }
    }

    /// Records an action a screen performed on behalf of the user.
    pub fn record_action(&self, action: &str) {
        self.audit.record(
            AuditEvent::new(AuditEventKind::ActionInvoked)
                .detail("window", self.title.as_str())
                .detail("action", action),
        );
    }

    /// Final transition. Runs the close hook first unless a close request
    /// already moved the window to `Closing`; its answer cannot stop teardown.
    pub fn destroy(&mut self) {
        match self.state {
            WindowState::Destroyed => return,
            WindowState::Constructed | WindowState::Visible => {
                self.close_requests += 1;
                let _ = (self.close_hook)();
            }
            WindowState::Closing => {}
        }
        self.state = WindowState::Destroyed;
        info!(title = %self.title, "shell window destroyed");
        self.audit.record(
            AuditEvent::new(AuditEventKind::WindowClosed).detail("window", self.title.as_str()),
        );
    }

    fn present(&mut self, kind: DialogKind, message: &str, secondary: Option<&str>) {
        if matches!(self.state, WindowState::Closing | WindowState::Destroyed) {
            warn!(
                title = %self.title,
                kind = kind.label(),
                "dialog requested on closing window; ignored"
            );
            return;
        }

        let dialog = MessageDialog {
            kind,
            title: self.title.clone(),
            message: message.to_string(),
            secondary: secondary.map(str::to_string),
        };
        self.dialogs.present(&dialog);
        self.dialog_cycles += 1;
        self.audit.record(
            AuditEvent::new(AuditEventKind::DialogPresented)
                .detail("window", self.title.as_str())
                .detail("kind", kind.label())
                .detail("message", message),
        );
    }
}

impl ShellCapability for ShellWindow {
    fn apply_shell_style(&self, display: &dyn StyleTarget) {
        display.apply_window_class(MAIN_WINDOW_CLASS);
    }

    fn show_error(&mut self, message: &str, secondary: Option<&str>) {
        self.present(DialogKind::Error, message, secondary);
    }

    fn show_info(&mut self, message: &str, secondary: Option<&str>) {
        self.present(DialogKind::Info, message, secondary);
    }

    /// One hook call per attempt. `Keep` leaves the window where it was.
    fn on_close_requested(&mut self) -> CloseDecision {
        if self.state == WindowState::Destroyed {
            return CloseDecision::Allow;
        }
        self.close_requests += 1;
        let decision = (self.close_hook)();
        if decision == CloseDecision::Allow {
            self.state = WindowState::Closing;
            debug!(title = %self.title, "shell window closing");
        }
        decision
    }
}

impl Drop for ShellWindow {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
#[path = "tests/window_tests.rs"]
mod tests;
