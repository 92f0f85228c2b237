//! Build command implementation.
//!
//! Produces the docset manifest for a project, bundling the built storybook
//! when one exists.

use std::path::{Path, PathBuf};

use anyhow::Result;
use storyshelf_ops::{BuildRequest, BuildResponse, Config, ManifestSource, OpsContext};
use tracing::info;

/// Execute the build command.
pub async fn execute(
    config: &Config,
    path: &Path,
    output: Option<PathBuf>,
    skip_external: bool,
    verbose: bool,
) -> Result<BuildResponse> {
    let output = output.unwrap_or_else(|| config.output_dir.clone());
    info!(path = %path.display(), output = %output.display(), "Building docset");

    let mut request = BuildRequest::new(path).with_output(&output);
    if skip_external {
        request = request.skip_external();
    }

    let ctx = OpsContext::new(config.clone());
    let response = ctx.build(request).await?;

    print_summary(&response, verbose);
    Ok(response)
}

fn print_summary(response: &BuildResponse, verbose: bool) {
    println!("📚 Docset manifest");
    println!("{:─<50}", "");
    println!("🔍 Source:     {}", source_label(response.source));
    println!("📄 Entries:    {}", response.entry_count());

    if let Some(error) = &response.external_error {
        println!("⚠️  External:   {}", error);
    }

    if let Some(report) = &response.report {
        println!(
            "🗂  Scanned:    {} files, {} groups, {} variants ({})",
            report.files.len(),
            report.group_count(),
            report.variant_count(),
            humansize::format_size(report.bytes_scanned, humansize::DECIMAL)
        );
        for failure in &report.failures {
            println!("   ✗ {}: {}", failure.path.display(), failure.error);
        }
    }

    if let Some(path) = &response.manifest_path {
        println!("💾 Manifest:   {}", path.display());
    }
    if let Some(path) = &response.included {
        println!("📦 Storybook:  {}", path.display());
    }

    if verbose {
        println!();
        for (display_path, url) in &response.entries.component {
            println!("   {} → {}", display_path, url);
        }
    }
}

fn source_label(source: ManifestSource) -> &'static str {
    match source {
        ManifestSource::External => "extracted story metadata",
        ManifestSource::Scanned => "scanned story sources",
        ManifestSource::Degraded => "generic entry (no stories found)",
    }
}

