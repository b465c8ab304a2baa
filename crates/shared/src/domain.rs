use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

/// Position of an entry in a tool catalog, assigned when the catalog is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ToolId(pub usize);

/// Program plus arguments for one child process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchDescriptor {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl LaunchDescriptor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Program followed by its arguments, the way a shell would see them.
    pub fn command_line(&self) -> Vec<String> {
        std::iter::once(self.program.to_string_lossy().into_owned())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelinuxMode {
    Disabled,
    Permissive,
    Enforcing,
}

impl SelinuxMode {
    pub fn label(self) -> &'static str {
        match self {
            SelinuxMode::Disabled => "disabled",
            SelinuxMode::Permissive => "permissive",
            SelinuxMode::Enforcing => "enforcing",
        }
    }
}

/// The `user:role:type[:level]` components of a security label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelParts {
    pub user: String,
    pub role: String,
    pub security_type: String,
    pub level: Option<String>,
}

/// Mandatory-access-control label of the running process.
///
/// The raw text is always kept. `parts` is only present when the text has
/// the usual colon-separated shape; the level keeps any colons of its own
/// (`s0:c0.c5`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityLabel {
    raw: String,
    parts: Option<LabelParts>,
}

impl SecurityLabel {
    /// Returns `None` for empty text. Kernel attribute files may carry a
    /// trailing NUL and newline; both are stripped.
    pub fn parse(text: &str) -> Option<Self> {
        let raw = text.trim_end_matches(['\0', '\n']).trim();
        if raw.is_empty() {
            return None;
        }

        let mut fields = raw.splitn(4, ':');
        let user = fields.next().unwrap_or_default();
        let role = fields.next().unwrap_or_default();
        let security_type = fields.next().unwrap_or_default();
        let level = fields.next().filter(|level| !level.is_empty());

        let parts = if user.is_empty() || role.is_empty() || security_type.is_empty() {
            None
        } else {
            Some(LabelParts {
                user: user.to_string(),
                role: role.to_string(),
                security_type: security_type.to_string(),
                level: level.map(str::to_string),
            })
        };

        Some(Self {
            raw: raw.to_string(),
            parts,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn parts(&self) -> Option<&LabelParts> {
        self.parts.as_ref()
    }

    pub fn level(&self) -> Option<&str> {
        self.parts.as_ref().and_then(|parts| parts.level.as_deref())
    }
}

impl fmt::Display for SecurityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// What the host reported about its isolation context at startup.
/// Built once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceContext {
    security_label: Option<SecurityLabel>,
    strict_mode_enabled: bool,
    selinux_mode: SelinuxMode,
}

impl ComplianceContext {
    pub fn new(
        security_label: Option<SecurityLabel>,
        strict_mode_enabled: bool,
        selinux_mode: SelinuxMode,
    ) -> Self {
        Self {
            security_label,
            strict_mode_enabled,
            selinux_mode,
        }
    }

    pub fn security_label(&self) -> Option<&SecurityLabel> {
        self.security_label.as_ref()
    }

    pub fn strict_mode_enabled(&self) -> bool {
        self.strict_mode_enabled
    }

    pub fn selinux_mode(&self) -> SelinuxMode {
        self.selinux_mode
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
