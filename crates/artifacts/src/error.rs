//! Error types for the artifacts crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading model artifacts
///
/// Every variant names the file it came from so the message shown to the
/// user points at the artifact to fix.
#[derive(Error, Debug)]
pub enum ArtifactLoadError {
    /// Artifact file does not exist
    #[error("Artifact not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// I/O error while reading an artifact
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a well-formed artifact document
    #[error("Corrupt artifact {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed but describes a model that can't be built
    #[error("Incompatible artifact {}: {source}", path.display())]
    Incompatible {
        path: PathBuf,
        #[source]
        source: model::ModelError,
    },
}

impl ArtifactLoadError {
    /// Path of the artifact that failed.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ArtifactLoadError::FileNotFound { path }
            | ArtifactLoadError::Io { path, .. }
            | ArtifactLoadError::Corrupt { path, .. }
            | ArtifactLoadError::Incompatible { path, .. } => path,
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ArtifactLoadError>;
