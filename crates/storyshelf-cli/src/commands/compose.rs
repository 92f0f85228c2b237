//! Compose command implementation.
//!
//! Writes the scanned docset manifest as JSON or as a browsable HTML index.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use askama::Template;
use storyshelf_ops::{Config, DocsetEntries, OpsContext, ScanRequest};
use tracing::info;

/// Output format for composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Html,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "html" | "htm" => Ok(Self::Html),
            _ => anyhow::bail!("Unknown format: {}. Use 'json' or 'html'", s),
        }
    }
}

/// Compose the manifest for `path` to the specified output.
pub fn execute(
    config: &Config,
    path: &Path,
    output: Option<PathBuf>,
    format: OutputFormat,
    prefix: &str,
) -> Result<PathBuf> {
    let ctx = OpsContext::new(config.clone());
    let response = ctx.scan(ScanRequest::new(path))?;
    let entries = response.entries();

    info!(
        path = %path.display(),
        entries = entries.len(),
        skipped = response.report.failures.len(),
        "Composing manifest"
    );

    let output_path = output.unwrap_or_else(|| {
        config
            .output_dir
            .join(format!("entries.{}", format.extension()))
    });

    let content = match format {
        OutputFormat::Json => render_json(&entries)?,
        OutputFormat::Html => render_html(&entries, prefix)?,
    };

    // Ensure parent directory exists
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    std::fs::write(&output_path, content)
        .with_context(|| format!("Failed to write output to: {}", output_path.display()))?;

    println!("Output written to: {}", output_path.display());
    println!(
        "  {} entries from {} files",
        entries.len(),
        response.report.files.len()
    );

    Ok(output_path)
}

/// Render entries as JSON.
fn render_json(entries: &DocsetEntries) -> Result<String> {
    serde_json::to_string_pretty(entries).with_context(|| "Failed to serialize manifest to JSON")
}

/// Render entries as an HTML index page.
fn render_html(entries: &DocsetEntries, prefix: &str) -> Result<String> {
    let template = IndexTemplate {
        title: "Components",
        prefix,
        entries: entries
            .component
            .iter()
            .map(|(path, url)| EntryRow { path, url })
            .collect(),
    };
    template
        .render()
        .with_context(|| "Failed to render HTML index template")
}

/// One link on the index page.
struct EntryRow<'a> {
    path: &'a str,
    url: &'a str,
}

/// Askama template for the HTML index.
#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    title: &'a str,
    prefix: &'a str,
    entries: Vec<EntryRow<'a>>,
}
