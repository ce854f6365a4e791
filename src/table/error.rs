//! Result file decoding errors.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while reading a collector result file.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Result file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read result file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DecodeError {
    pub(crate) fn from_io(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            DecodeError::NotFound { path }
        } else {
            DecodeError::Io { path, source }
        }
    }

    /// Every read failure may clear up on the next poll: the collector may
    /// not have created the file yet, or may be holding it mid-rename.
    pub fn is_retryable(&self) -> bool {
        match self {
            DecodeError::NotFound { .. } | DecodeError::Io { .. } => true,
        }
    }

    /// A missing file means the collector has produced zero rows so far.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DecodeError::NotFound { .. })
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            DecodeError::NotFound { path } | DecodeError::Io { path, .. } => path,
        }
    }
}
