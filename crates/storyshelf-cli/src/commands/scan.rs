//! Scan command implementation.
//!
//! Runs the fallback story scanner over a file, a directory tree, or stdin
//! and prints what it found.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use storyshelf_core::{StoryGroup, StoryScanner};
use storyshelf_ops::{Config, FileScanReport, OpsContext, ScanRequest};
use tracing::info;

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanFormat {
    Text,
    Json,
}

impl std::str::FromStr for ScanFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!("Unknown format: {}. Use 'text' or 'json'", s),
        }
    }
}

/// Execute the scan command. A path of `-` scans stdin.
pub fn execute(config: &Config, path: &Path, format: ScanFormat) -> Result<()> {
    if path == Path::new("-") {
        return scan_stdin(config, format);
    }

    info!(path = %path.display(), "Scanning story sources");
    let ctx = OpsContext::new(config.clone());
    let response = ctx.scan(ScanRequest::new(path))?;

    match format {
        ScanFormat::Json => {
            let json = serde_json::to_string_pretty(&response)
                .context("Failed to serialize scan results")?;
            println!("{}", json);
        }
        ScanFormat::Text => print_report(&response.report),
    }

    Ok(())
}

/// Scan stdin as a single story module. Any scan error is fatal.
fn scan_stdin(config: &Config, format: ScanFormat) -> Result<()> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read stdin")?;

    let scanner = StoryScanner::new(&config.scan)?;
    let groups = scanner.scan(&text).context("Failed to scan stdin")?;

    match format {
        ScanFormat::Json => println!("{}", serde_json::to_string_pretty(&groups)?),
        ScanFormat::Text => print_groups(&groups),
    }
    Ok(())
}

fn print_report(report: &FileScanReport) {
    for file in &report.files {
        println!("{}", file.path.display());
        print_groups(&file.groups);
    }

    for failure in &report.failures {
        println!("{} (skipped: {})", failure.path.display(), failure.error);
    }

    println!(
        "\n{} files, {} groups, {} variants, {} skipped",
        report.files.len(),
        report.group_count(),
        report.variant_count(),
        report.failures.len()
    );
}

fn print_groups(groups: &[StoryGroup]) {
    for group in groups {
        println!("  {}", group.name);
        for variant in &group.variants {
            println!("    - {}", variant);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_format_parse() {
        assert_eq!("json".parse::<ScanFormat>().unwrap(), ScanFormat::Json);
        assert_eq!("TEXT".parse::<ScanFormat>().unwrap(), ScanFormat::Text);
        assert!("yaml".parse::<ScanFormat>().is_err());
    }
}
