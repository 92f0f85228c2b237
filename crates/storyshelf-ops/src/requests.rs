//! Request DTOs for operations.
//!
//! Each request type encapsulates all the parameters needed for an operation,
//! making it easy to call from the CLI or programmatically.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Request to build a docset manifest for a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildRequest {
    /// Project root.
    pub root: PathBuf,

    /// Where to write the manifest and bundled storybook. Nothing is written
    /// when unset.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Skip the external build/extract step and scan sources directly.
    #[serde(default)]
    pub skip_external: bool,
}

impl BuildRequest {
    /// Create a build request for a project root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: None,
            skip_external: false,
        }
    }

    /// Write results to `output`.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Go straight to the source scanner.
    pub fn skip_external(mut self) -> Self {
        self.skip_external = true;
        self
    }
}

/// Request to scan story sources without running any external tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRequest {
    /// A single story file, or a directory to search for story files.
    pub path: PathBuf,
}

impl ScanRequest {
    /// Create a scan request for a file or directory.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}
