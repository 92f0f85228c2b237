//! External story build and metadata extraction.
//!
//! When the project's own story toolchain is installed, running its static
//! build followed by its extract command leaves a `stories.json` next to the
//! built site. That manifest is authoritative; the source scanner is only
//! used when this step fails.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{OpsError, OpsResult};

/// Metadata file written by the extract command.
pub const STORIES_FILE: &str = "stories.json";

/// One story entry from `stories.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryMeta {
    /// Viewer id, e.g. `example-button--primary`.
    pub id: String,
    /// Grouping label. Newer toolchains call it `title`.
    #[serde(alias = "title")]
    pub kind: String,
    /// Variant display name.
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct StoriesFile {
    #[serde(default)]
    stories: BTreeMap<String, StoryMeta>,
}

/// Run the build and extract commands in `root`, then read their manifest.
pub async fn extract_stories(root: &Path, config: &Config) -> OpsResult<Vec<StoryMeta>> {
    run_command(root, &config.build_command).await?;
    run_command(root, &config.extract_command).await?;

    let path = root.join(&config.storybook_dir).join(STORIES_FILE);
    if !path.exists() {
        return Err(OpsError::ArtifactsMissing { path });
    }
    read_stories_file(&path)
}

/// Run one command to completion in `dir`.
pub async fn run_command(dir: &Path, command: &[String]) -> OpsResult<()> {
    let Some((program, args)) = command.split_first() else {
        return Err(OpsError::command_failed(command, "no command configured"));
    };

    info!(command = %command.join(" "), "Running external command");
    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()
        .await
        .map_err(|err| OpsError::command_failed(command, err.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = match stderr.trim() {
            "" => output.status.to_string(),
            tail => tail.lines().last().unwrap_or(tail).to_string(),
        };
        return Err(OpsError::command_failed(command, message));
    }

    debug!(command = %command.join(" "), "External command finished");
    Ok(())
}

/// Read and parse a `stories.json` file.
pub fn read_stories_file(path: &Path) -> OpsResult<Vec<StoryMeta>> {
    let contents = std::fs::read_to_string(path)?;
    parse_stories(&contents)
}

/// Parse `stories.json` contents into story entries.
pub fn parse_stories(contents: &str) -> OpsResult<Vec<StoryMeta>> {
    let file: StoriesFile = serde_json::from_str(contents)?;
    Ok(file.stories.into_values().collect())
}
