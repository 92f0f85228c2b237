//! Error types for the operations layer.

use std::path::PathBuf;

use storyshelf_core::ScanError;
use thiserror::Error;

/// Result type for operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// Errors that can occur during operations.
#[derive(Debug, Error)]
pub enum OpsError {
    /// An external build or extract command failed to run or exited non-zero.
    #[error("Command `{command}` failed: {message}")]
    CommandFailed { command: String, message: String },

    /// The extract step ran but left no stories manifest behind.
    #[error("Could not find story artifacts at {path}")]
    ArtifactsMissing { path: PathBuf },

    /// Story source scanning failed.
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Path resolution error.
    #[error("Failed to resolve path {path}: {message}")]
    PathResolution { path: PathBuf, message: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl OpsError {
    /// Create a command failure error.
    pub fn command_failed(command: &[String], message: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.join(" "),
            message: message.into(),
        }
    }

    /// Create a path resolution error.
    pub fn path_resolution(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::PathResolution {
            path: path.into(),
            message: message.into(),
        }
    }
}
