use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The registry file exists but does not hold a registry snapshot.
    #[error("registry file {path} is corrupt: {source}")]
    ConfigCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The registry file parses but an entry contradicts itself.
    #[error("registry file {path} is inconsistent: {reason}")]
    InvalidEntry { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    #[must_use]
    pub fn config_corrupt(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigCorrupt {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn invalid_entry(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidEntry {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the process should refuse to start on this error.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ConfigCorrupt { .. } | Self::InvalidEntry { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
