//! Story file discovery and fallback scanning.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use storyshelf_core::{StoryGroup, StoryScanner};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::Config;

/// Customizable walk options.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// File name suffixes to keep (empty = all files).
    pub suffixes: Vec<String>,
    /// Additional directory or file names to exclude.
    pub exclude: Vec<String>,
    /// Maximum file size to include (in bytes).
    pub max_size: Option<u64>,
    /// Whether to descend into hidden entries.
    pub include_hidden: bool,
}

impl WalkOptions {
    /// Create walk options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk options for story modules as configured.
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .suffixes(config.story_suffixes.iter().cloned())
            .exclude(config.storybook_dir.file_name().and_then(|n| n.to_str()))
            .max_size(config.max_file_size())
    }

    /// Keep only files ending with one of these suffixes.
    pub fn suffixes(mut self, suffixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.suffixes.extend(suffixes.into_iter().map(|s| s.into()));
        self
    }

    /// Add names to exclude.
    pub fn exclude(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude.extend(names.into_iter().map(|s| s.into()));
        self
    }

    /// Set maximum file size.
    pub fn max_size(mut self, size: u64) -> Self {
        self.max_size = Some(size);
        self
    }

    /// Include hidden files.
    pub fn include_hidden(mut self) -> Self {
        self.include_hidden = true;
        self
    }

    fn keeps_name(&self, name: &str) -> bool {
        self.suffixes.is_empty() || self.suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }
}

/// Find candidate story files under `root`, sorted by path.
pub fn find_story_files(root: &Path, options: &WalkOptions) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).into_iter().filter_entry(|e| {
        // The root itself is never filtered, even when it is `.`
        if e.depth() == 0 {
            return true;
        }
        if !options.include_hidden && is_hidden(e) {
            return false;
        }
        if is_blacklisted(e) {
            return false;
        }
        if let Some(name) = e.file_name().to_str() {
            if options.exclude.iter().any(|ex| name == ex) {
                return false;
            }
        }
        true
    }) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "Skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let keep = entry
            .file_name()
            .to_str()
            .map(|name| options.keeps_name(name))
            .unwrap_or(false);
        if !keep {
            continue;
        }

        if let Some(max_size) = options.max_size {
            if let Ok(meta) = entry.metadata() {
                if meta.len() > max_size {
                    debug!(path = %entry.path().display(), size = meta.len(), "Skipping oversized story file");
                    continue;
                }
            }
        }

        files.push(entry.into_path());
    }

    files.sort();
    files
}

/// Check if entry is hidden (starts with .).
fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

/// Check if entry is in a blacklisted directory.
fn is_blacklisted(entry: &walkdir::DirEntry) -> bool {
    const BLACKLIST: &[&str] = &[
        "node_modules",
        "dist",
        "build",
        "coverage",
        "storybook-static",
        ".git",
        ".next",
        ".turbo",
        ".cache",
    ];

    entry
        .file_name()
        .to_str()
        .map(|s| BLACKLIST.contains(&s))
        .unwrap_or(false)
}

/// Story groups harvested from one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannedFile {
    /// Path of the story file.
    pub path: PathBuf,
    /// Groups found in it, in source order.
    pub groups: Vec<StoryGroup>,
}

/// A file that could not be read or scanned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanFailure {
    /// Path of the story file.
    pub path: PathBuf,
    /// Rendered error.
    pub error: String,
}

/// Outcome of scanning a batch of story files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileScanReport {
    /// Files that scanned cleanly, in input order.
    pub files: Vec<ScannedFile>,
    /// Files that were skipped because of an error.
    pub failures: Vec<ScanFailure>,
    /// Total bytes read from successfully scanned files.
    pub bytes_scanned: u64,
}

impl FileScanReport {
    /// All groups across all files, in order.
    pub fn groups(&self) -> impl Iterator<Item = &StoryGroup> {
        self.files.iter().flat_map(|f| f.groups.iter())
    }

    /// Number of groups found.
    pub fn group_count(&self) -> usize {
        self.groups().count()
    }

    /// Number of variants found.
    pub fn variant_count(&self) -> usize {
        self.groups().map(|g| g.variants.len()).sum()
    }
}

/// Scan each file; a failing file is recorded and skipped, never fatal.
pub fn scan_story_files(paths: &[PathBuf], scanner: &StoryScanner) -> FileScanReport {
    let mut report = FileScanReport::default();

    for path in paths {
        let result = std::fs::read_to_string(path)
            .map_err(|err| err.to_string())
            .and_then(|text| {
                let groups = scanner.scan(&text).map_err(|err| err.to_string())?;
                Ok((text.len() as u64, groups))
            });

        match result {
            Ok((bytes, groups)) => {
                debug!(path = %path.display(), groups = groups.len(), "Scanned story file");
                report.bytes_scanned += bytes;
                report.files.push(ScannedFile {
                    path: path.clone(),
                    groups,
                });
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "Skipping story file");
                report.failures.push(ScanFailure {
                    path: path.clone(),
                    error,
                });
            }
        }
    }

    report
}
