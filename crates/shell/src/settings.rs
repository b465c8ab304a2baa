//! Shell settings: defaults, then an optional TOML file, then environment.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use umrs_compliance::StatusPaths;
use umrs_launcher::DEFAULT_SCRIPT_INTERPRETER;

use crate::error::SettingsError;

pub const SETTINGS_FILE_NAME: &str = "umrs-shell.toml";
pub const SETTINGS_PATH_ENV: &str = "UMRS_SHELL_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellSettings {
    pub status_paths: StatusPaths,
    pub require_strict_crypto: bool,
    pub script_interpreter: PathBuf,
    /// `None` means next to the running executable.
    pub tools_dir: Option<PathBuf>,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            status_paths: StatusPaths::default(),
            require_strict_crypto: false,
            script_interpreter: PathBuf::from(DEFAULT_SCRIPT_INTERPRETER),
            tools_dir: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    security_label_path: Option<PathBuf>,
    fips_status_path: Option<PathBuf>,
    selinux_enforce_path: Option<PathBuf>,
    require_strict_crypto: Option<bool>,
    script_interpreter: Option<PathBuf>,
    tools_dir: Option<PathBuf>,
}

impl ShellSettings {
    /// Settings from the process environment, reading the file named by
    /// `explicit`, `UMRS_SHELL_CONFIG`, or the first default location that
    /// exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        let mut settings = Self::default();

        let file = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => env::var_os(SETTINGS_PATH_ENV)
                .map(PathBuf::from)
                .or_else(default_settings_file),
        };
        if let Some(path) = file {
            settings.merge_file(&path)?;
        }

        settings.apply_env(|name| env::var(name).ok());
        Ok(settings)
    }

    pub fn merge_file(&mut self, path: &Path) -> Result<(), SettingsError> {
        let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.merge_toml(&raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn merge_toml(&mut self, raw: &str) -> Result<(), toml::de::Error> {
        let file: FileSettings = toml::from_str(raw)?;
        if let Some(v) = file.security_label_path {
            self.status_paths.security_label = v;
        }
        if let Some(v) = file.fips_status_path {
            self.status_paths.fips_status = v;
        }
        if let Some(v) = file.selinux_enforce_path {
            self.status_paths.selinux_enforce = v;
        }
        if let Some(v) = file.require_strict_crypto {
            self.require_strict_crypto = v;
        }
        if let Some(v) = file.script_interpreter {
            self.script_interpreter = v;
        }
        if file.tools_dir.is_some() {
            self.tools_dir = file.tools_dir;
        }
        Ok(())
    }

    /// Environment overrides; `lookup` stands in for `std::env::var`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("UMRS_SECURITY_LABEL_PATH") {
            self.status_paths.security_label = v.into();
        }
        if let Some(v) = lookup("UMRS_FIPS_STATUS_PATH") {
            self.status_paths.fips_status = v.into();
        }
        if let Some(v) = lookup("UMRS_SELINUX_ENFORCE_PATH") {
            self.status_paths.selinux_enforce = v.into();
        }
        if let Some(v) = lookup("UMRS_REQUIRE_FIPS") {
            self.require_strict_crypto =
                matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true");
        }
        if let Some(v) = lookup("UMRS_SCRIPT_INTERPRETER") {
            self.script_interpreter = v.into();
        }
        if let Some(v) = lookup("UMRS_TOOLS_DIR") {
            self.tools_dir = Some(v.into());
        }
    }
}

fn default_settings_file() -> Option<PathBuf> {
    let local = PathBuf::from(SETTINGS_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("umrs").join(SETTINGS_FILE_NAME))
        .filter(|path| path.is_file())
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
