use std::{io, path::PathBuf};

use thiserror::Error;
use umrs_shared::ComplianceError;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Anything that stops the shell from coming up.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Compliance(#[from] ComplianceError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
