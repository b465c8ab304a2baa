//! Modal message dialogs.

use rfd::{MessageButtons, MessageLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Error,
    Info,
}

impl DialogKind {
    pub fn label(self) -> &'static str {
        match self {
            DialogKind::Error => "error",
            DialogKind::Info => "info",
        }
    }
}

/// One dialog with a single acknowledgement button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
    pub secondary: Option<String>,
}

impl MessageDialog {
    /// Primary message, then the secondary detail as its own paragraph.
    pub fn body(&self) -> String {
        match self.secondary.as_deref().filter(|s| !s.is_empty()) {
            Some(secondary) => format!("{}\n\n{secondary}", self.message),
            None => self.message.clone(),
        }
    }
}

/// Presents a dialog and returns once the user has dismissed it.
pub trait DialogPresenter: Send + Sync {
    fn present(&self, dialog: &MessageDialog);
}

/// Native message boxes. `show` blocks the calling (UI) thread until the
/// user acknowledges, which keeps the parent window from taking input.
#[derive(Debug, Default, Clone, Copy)]
pub struct RfdDialogPresenter;

impl DialogPresenter for RfdDialogPresenter {
    fn present(&self, dialog: &MessageDialog) {
        let level = match dialog.kind {
            DialogKind::Error => MessageLevel::Error,
            DialogKind::Info => MessageLevel::Info,
        };
        rfd::MessageDialog::new()
            .set_level(level)
            .set_title(dialog.title.as_str())
            .set_description(dialog.body())
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}
