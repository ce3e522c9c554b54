//! Typed errors raised by catalog resolution and document loading.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors returned by catalog resolution, discovery, and document loading.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse json document '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("json document '{}' must be an object at the top level", path.display())]
    NotAnObject { path: PathBuf },
    #[error("image base name cannot be empty")]
    EmptyBaseName,
    #[error("unknown model '{0}'")]
    UnknownModel(String),
    #[error("invalid catalog layout: {0}")]
    InvalidLayout(String),
    #[error("invalid image extension allowlist: {0}")]
    InvalidExtensions(String),
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true when the error is a filesystem "not found" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
