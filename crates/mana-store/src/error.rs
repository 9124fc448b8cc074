//! Error types for the champion store

use std::path::{Path, PathBuf};

/// Champion store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem operation failed
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exists but is not valid JSON for the stored type
    #[error("corrupt champion data at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Value could not be serialized
    #[error("cannot serialize champion {champion_id}: {source}")]
    Serialize {
        champion_id: u32,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Create I/O error for a path
    #[must_use]
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Check if the error comes from unreadable stored data
    #[inline]
    #[must_use]
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}
