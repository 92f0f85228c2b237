//! Response DTOs for operations.
//!
//! Each response type contains all the data produced by an operation,
//! making it easy to consume from the CLI or programmatically.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::manifest::DocsetEntries;
use crate::walk::FileScanReport;

/// Where a manifest's entries came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestSource {
    /// The external toolchain's extracted metadata.
    External,
    /// The fallback source scanner.
    Scanned,
    /// Neither produced anything; a single generic entry.
    Degraded,
}

impl fmt::Display for ManifestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestSource::External => write!(f, "external"),
            ManifestSource::Scanned => write!(f, "scanned"),
            ManifestSource::Degraded => write!(f, "degraded"),
        }
    }
}

/// Response from a build operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildResponse {
    /// The composed manifest.
    pub entries: DocsetEntries,

    /// Which path produced the entries.
    pub source: ManifestSource,

    /// Fallback scan details, when the scanner ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<FileScanReport>,

    /// Why the external step was not used, when it was attempted and failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_error: Option<String>,

    /// Path of the written manifest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_path: Option<PathBuf>,

    /// Path of the bundled storybook copy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included: Option<PathBuf>,
}

impl BuildResponse {
    /// Get total entry count.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest is the generic fallback.
    pub fn is_degraded(&self) -> bool {
        self.source == ManifestSource::Degraded
    }
}

/// Response from a scan operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResponse {
    /// Path that was scanned.
    pub path: PathBuf,

    /// Per-file results.
    pub report: FileScanReport,
}

impl ScanResponse {
    /// Manifest entries for the scanned groups.
    pub fn entries(&self) -> DocsetEntries {
        DocsetEntries::from_groups(self.report.groups())
    }
}
