//! UMRS application shell: theme, window contract, modal dialogs and the
//! explicitly constructed context every screen is built from.

pub mod context;
pub mod dialog;
pub mod egui_shell;
pub mod error;
pub mod settings;
pub mod theme;
pub mod window;

pub use context::ShellContext;
pub use dialog::{DialogKind, DialogPresenter, MessageDialog, RfdDialogPresenter};
pub use error::{SettingsError, ShellError};
pub use settings::ShellSettings;
pub use theme::{StylePriority, StyleRule, StyleSheet, StyleTarget, ThemeLoad, ThemeManager};
pub use window::{
    CloseDecision, ShellCapability, ShellWindow, WindowConfig, WindowSize, WindowState,
};
