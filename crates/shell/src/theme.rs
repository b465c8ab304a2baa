//! UMRS style sheet and the once-only registration of it with a display.

use std::{collections::BTreeMap, sync::OnceLock};

use tracing::{debug, warn};
use umrs_shared::{AuditEvent, AuditEventKind, AuditSink};

pub const MAIN_WINDOW_CLASS: &str = "umrs-main-window";
pub const HEADER_CLASS: &str = "umrs-header";
pub const SECTION_TITLE_CLASS: &str = "umrs-section-title";
pub const PRIMARY_ACTION_CLASS: &str = "umrs-primary-action";
pub const ACCENT_CLASS: &str = "umrs-accent";
pub const BUTTON_CLASS: &str = "umrs-button";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn hex(value: u32) -> Self {
        Self((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleRule {
    pub background: Option<Rgb>,
    pub foreground: Option<Rgb>,
    pub hover_background: Option<Rgb>,
    pub border: Option<Rgb>,
    pub bold: bool,
}

/// Display-subsystem priority levels, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StylePriority {
    Fallback,
    Theme,
    Settings,
    Application,
    User,
}

/// Style rules keyed by class name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSheet {
    rules: BTreeMap<&'static str, StyleRule>,
}

impl StyleSheet {
    pub fn umrs() -> Self {
        let mut rules = BTreeMap::new();
        rules.insert(
            MAIN_WINDOW_CLASS,
            StyleRule {
                background: Some(Rgb::hex(0x111416)),
                foreground: Some(Rgb::hex(0xd5e3d5)),
                ..StyleRule::default()
            },
        );
        rules.insert(
            HEADER_CLASS,
            StyleRule {
                background: Some(Rgb::hex(0x121212)),
                foreground: Some(Rgb::hex(0x84c991)),
                bold: true,
                ..StyleRule::default()
            },
        );
        rules.insert(
            SECTION_TITLE_CLASS,
            StyleRule {
                foreground: Some(Rgb::hex(0x88ff88)),
                bold: true,
                ..StyleRule::default()
            },
        );
        rules.insert(
            PRIMARY_ACTION_CLASS,
            StyleRule {
                background: Some(Rgb::hex(0x1b401b)),
                foreground: Some(Rgb::hex(0xe0ffe0)),
                hover_background: Some(Rgb::hex(0x285f28)),
                ..StyleRule::default()
            },
        );
        rules.insert(
            ACCENT_CLASS,
            StyleRule {
                foreground: Some(Rgb::hex(0x6fbf73)),
                ..StyleRule::default()
            },
        );
        rules.insert(
            BUTTON_CLASS,
            StyleRule {
                background: Some(Rgb::hex(0x1a1f1a)),
                hover_background: Some(Rgb::hex(0x223022)),
                border: Some(Rgb::hex(0x355f35)),
                ..StyleRule::default()
            },
        );
        Self { rules }
    }

    pub fn rule(&self, class: &str) -> Option<&StyleRule> {
        self.rules.get(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.keys().copied()
    }
}

/// A display a style sheet can be attached to.
pub trait StyleTarget {
    fn register_style_sheet(&self, sheet: &StyleSheet, priority: StylePriority);
    fn apply_window_class(&self, class: &str);
}

/// Outcome of the first [`ThemeManager::ensure_loaded`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeLoad {
    Registered,
    NoDisplay,
}

/// Owns the style sheet and registers it at most once.
///
/// Without a display the first call still counts: the theme is marked loaded
/// and the absence is reported, so headless callers never crash.
pub struct ThemeManager {
    sheet: StyleSheet,
    loaded: OnceLock<ThemeLoad>,
}

impl ThemeManager {
    pub fn new(sheet: StyleSheet) -> Self {
        Self {
            sheet,
            loaded: OnceLock::new(),
        }
    }

    pub fn sheet(&self) -> &StyleSheet {
        &self.sheet
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }

    pub fn ensure_loaded(
        &self,
        display: Option<&dyn StyleTarget>,
        audit: &dyn AuditSink,
    ) -> ThemeLoad {
        *self.loaded.get_or_init(|| match display {
            Some(display) => {
                display.register_style_sheet(&self.sheet, StylePriority::Application);
                debug!(classes = self.sheet.rules.len(), "umrs style sheet registered");
                ThemeLoad::Registered
            }
            None => {
                warn!("no display available; umrs style sheet not registered");
                audit.record(
                    AuditEvent::new(AuditEventKind::ThemeUnavailable)
                        .detail("reason", "no default display"),
                );
                ThemeLoad::NoDisplay
            }
        })
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new(StyleSheet::umrs())
    }
}

#[cfg(test)]
#[path = "tests/theme_tests.rs"]
mod tests;
