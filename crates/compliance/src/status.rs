use std::{
    fs, io,
    path::{Path, PathBuf},
};

pub const DEFAULT_SECURITY_LABEL_PATH: &str = "/proc/self/attr/current";
pub const DEFAULT_FIPS_STATUS_PATH: &str = "/proc/sys/crypto/fips_enabled";
pub const DEFAULT_SELINUX_ENFORCE_PATH: &str = "/sys/fs/selinux/enforce";

/// Trimmed status values that count as "strict crypto mode on".
pub const STRICT_MODE_ENABLED_VALUES: [&str; 2] = ["1", "enabled"];

/// Where the host publishes its status values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPaths {
    pub security_label: PathBuf,
    pub fips_status: PathBuf,
    pub selinux_enforce: PathBuf,
}

impl Default for StatusPaths {
    fn default() -> Self {
        Self {
            security_label: DEFAULT_SECURITY_LABEL_PATH.into(),
            fips_status: DEFAULT_FIPS_STATUS_PATH.into(),
            selinux_enforce: DEFAULT_SELINUX_ENFORCE_PATH.into(),
        }
    }
}

pub(crate) fn read_status(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}

pub(crate) fn is_strict_mode_value(raw: &str) -> bool {
    STRICT_MODE_ENABLED_VALUES.contains(&raw.trim())
}
