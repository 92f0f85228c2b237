//! OpsContext - The main service for executing operations.
//!
//! The OpsContext holds configuration and provides methods for all storyshelf
//! operations. It can be used by the CLI or any other consumer.

use std::path::{Path, PathBuf};

use storyshelf_core::StoryScanner;
use tracing::{info, warn};

use crate::assets::{include_dir, Inclusion, LAYOUT_OVERRIDES};
use crate::config::Config;
use crate::error::{OpsError, OpsResult};
use crate::extract::extract_stories;
use crate::manifest::{DocsetEntries, STORYBOOK_ROOT};
use crate::requests::*;
use crate::responses::*;
use crate::walk::{find_story_files, scan_story_files, FileScanReport, WalkOptions};

/// Name of the manifest file written to the output directory.
pub const MANIFEST_FILE: &str = "entries.json";

/// The main operations context.
#[derive(Debug, Clone)]
pub struct OpsContext {
    /// Configuration for operations.
    pub config: Config,
}

impl OpsContext {
    /// Create a new OpsContext with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Create a new OpsContext with configuration loaded from disk.
    pub fn default_config() -> OpsResult<Self> {
        Ok(Self::new(Config::load()?))
    }

    /// Compile the fallback scanner from configuration.
    pub fn scanner(&self) -> OpsResult<StoryScanner> {
        Ok(StoryScanner::new(&self.config.scan)?)
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Build the docset manifest for a project.
    ///
    /// Tries the external toolchain first; if that fails, scans story sources.
    /// If the scan yields nothing either, falls back to a single generic entry.
    pub async fn build(&self, request: BuildRequest) -> OpsResult<BuildResponse> {
        let root = resolve_dir(&request.root)?;
        info!(root = %root.display(), "Building docset manifest");

        let mut external_error = None;
        let mut response = None;

        if !request.skip_external {
            match extract_stories(&root, &self.config).await {
                Ok(stories) => {
                    info!(stories = stories.len(), "Using extracted story metadata");
                    let entries = DocsetEntries::from_stories(&stories);
                    let (entries, source) = if entries.is_empty() {
                        warn!("Extracted metadata has no stories, writing a generic manifest");
                        (DocsetEntries::degraded(), ManifestSource::Degraded)
                    } else {
                        (entries, ManifestSource::External)
                    };
                    response = Some(BuildResponse {
                        entries,
                        source,
                        report: None,
                        external_error: None,
                        manifest_path: None,
                        included: None,
                    });
                }
                Err(err) => {
                    warn!(error = %err, "Story extraction failed, scanning sources instead");
                    external_error = Some(err.to_string());
                }
            }
        }

        let mut response = match response {
            Some(response) => response,
            None => {
                let report = self.scan_tree(&root.join(&self.config.source_root))?;
                let entries = DocsetEntries::from_groups(report.groups());
                let (entries, source) = if entries.is_empty() {
                    warn!("No stories found, writing a generic manifest");
                    (DocsetEntries::degraded(), ManifestSource::Degraded)
                } else {
                    (entries, ManifestSource::Scanned)
                };
                BuildResponse {
                    entries,
                    source,
                    report: Some(report),
                    external_error,
                    manifest_path: None,
                    included: None,
                }
            }
        };

        if let Some(output) = &request.output {
            std::fs::create_dir_all(output)?;
            response.manifest_path = Some(write_manifest(&response.entries, output)?);

            let storybook = root.join(&self.config.storybook_dir);
            if storybook.is_dir() {
                let inclusion = Inclusion::new(storybook, STORYBOOK_ROOT)
                    .append("index.html", LAYOUT_OVERRIDES);
                response.included = Some(include_dir(&inclusion, output)?);
            } else {
                warn!(path = %storybook.display(), "No built storybook to include");
            }
        }

        info!(
            source = %response.source,
            entries = response.entry_count(),
            "Docset manifest ready"
        );
        Ok(response)
    }

    // =========================================================================
    // Scan
    // =========================================================================

    /// Scan a story file, or every story file under a directory.
    pub fn scan(&self, request: ScanRequest) -> OpsResult<ScanResponse> {
        let path = request.path;
        let report = if path.is_file() {
            scan_story_files(std::slice::from_ref(&path), &self.scanner()?)
        } else {
            self.scan_tree(&resolve_dir(&path)?)?
        };

        Ok(ScanResponse { path, report })
    }

    fn scan_tree(&self, dir: &Path) -> OpsResult<FileScanReport> {
        let files = find_story_files(dir, &WalkOptions::from_config(&self.config));
        info!(dir = %dir.display(), files = files.len(), "Scanning story sources");
        Ok(scan_story_files(&files, &self.scanner()?))
    }
}

/// Write `entries` as pretty JSON into `output`.
pub fn write_manifest(entries: &DocsetEntries, output: &Path) -> OpsResult<PathBuf> {
    let path = output.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(entries)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

fn resolve_dir(path: &Path) -> OpsResult<PathBuf> {
    let resolved = path
        .canonicalize()
        .map_err(|err| OpsError::path_resolution(path, err.to_string()))?;
    if !resolved.is_dir() {
        return Err(OpsError::path_resolution(path, "not a directory"));
    }
    Ok(resolved)
}
