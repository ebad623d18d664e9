//! Error types for the add-on manager.

use std::io;
use std::path::PathBuf;

/// Result type for manager operations.
pub type ManagerResult<T> = Result<T, ManagerError>;

/// Errors that can occur while extracting, relocating or indexing packs.
#[derive(Debug)]
pub enum ManagerError {
    /// Failed to read a file or directory.
    ReadFailed { path: PathBuf, source: io::Error },

    /// Failed to write a file or directory.
    WriteFailed { path: PathBuf, source: io::Error },

    /// Failed to create a directory.
    CreateDirFailed { path: PathBuf, source: io::Error },

    /// Failed to remove a file or directory.
    RemoveFailed { path: PathBuf, source: io::Error },

    /// Failed to move a pack folder into place.
    MoveFailed {
        source_path: PathBuf,
        target: PathBuf,
        source: io::Error,
    },

    /// The file is not a valid ZIP container.
    InvalidArchive { path: PathBuf, reason: String },

    /// Archive extraction failed.
    ExtractionFailed { path: PathBuf, reason: String },

    /// Failed to persist a pack index.
    IndexWriteFailed { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for ManagerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadFailed { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            Self::WriteFailed { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
            Self::CreateDirFailed { path, source } => {
                write!(
                    f,
                    "failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::RemoveFailed { path, source } => {
                write!(f, "failed to remove {}: {}", path.display(), source)
            }
            Self::MoveFailed {
                source_path,
                target,
                source,
            } => {
                write!(
                    f,
                    "failed to move {} to {}: {}",
                    source_path.display(),
                    target.display(),
                    source
                )
            }
            Self::InvalidArchive { path, reason } => {
                write!(f, "{} is not a valid ZIP archive: {}", path.display(), reason)
            }
            Self::ExtractionFailed { path, reason } => {
                write!(f, "failed to extract {}: {}", path.display(), reason)
            }
            Self::IndexWriteFailed { path, source } => {
                write!(f, "failed to write index {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ManagerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadFailed { source, .. } => Some(source),
            Self::WriteFailed { source, .. } => Some(source),
            Self::CreateDirFailed { source, .. } => Some(source),
            Self::RemoveFailed { source, .. } => Some(source),
            Self::MoveFailed { source, .. } => Some(source),
            Self::IndexWriteFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}
