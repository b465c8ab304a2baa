use std::{io, path::PathBuf};

use thiserror::Error;

/// Strict-crypto gate failures. Callers treat either variant as fatal.
#[derive(Debug, Error)]
pub enum ComplianceError {
    #[error("cannot determine strict crypto mode from '{}': {source}", path.display())]
    StatusUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("strict crypto mode is required but not enabled (status '{found}')")]
    StrictModeDisabled { found: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog entry at position {position} has an empty display name")]
    EmptyName { position: usize },
    #[error("catalog already contains a tool named '{name}'")]
    DuplicateName { name: String },
    #[error("catalog entry '{name}' has an empty program")]
    EmptyProgram { name: String },
}
