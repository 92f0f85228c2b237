//! Storyshelf CLI - build docset manifests from component-library stories.
//!
//! Uses the project's story toolchain when it is installed, and falls back to
//! scanning story modules directly when it is not.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use storyshelf_ops::Config;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

mod commands;

use commands::{
    build, compose, compose::OutputFormat, config as config_cmd, scan, scan::ScanFormat,
};

/// Storyshelf CLI - turn component stories into docset entries.
///
/// Run `shelf` or `shelf build` in a component library to build its manifest.
#[derive(Parser, Debug)]
#[command(
    name = "shelf",
    author,
    version,
    about = "Storyshelf: docset manifests from component stories",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the docset manifest (default command).
    ///
    /// Runs the story build and extract commands; if they fail, scans story
    /// sources instead. Writes `entries.json` and a copy of the built
    /// storybook to the output directory.
    Build {
        /// Project root (defaults to current directory).
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output directory (defaults to the configured output_dir).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not run the external toolchain; scan sources directly.
        #[arg(long)]
        skip_external: bool,
    },

    /// Scan story sources and print the groups and variants found.
    Scan {
        /// Story file, directory, or `-` for stdin.
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format: text or json.
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Write the scanned manifest as JSON or an HTML index.
    Compose {
        /// Directory to scan (defaults to current directory).
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output file path.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: json or html.
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Prefix for stylesheet and link URLs in the HTML index.
        #[arg(long, default_value = "")]
        prefix: String,
    },

    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Configuration value.
        value: String,
    },

    /// Get a configuration value.
    Get {
        /// Configuration key.
        key: String,
    },

    /// Reset configuration to defaults.
    Reset,

    /// Show path to config file.
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN // Default to less noise
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();
    let config = Config::load()?;

    // Default to build if no command given
    let command = cli.command.unwrap_or(Commands::Build {
        path: PathBuf::from("."),
        output: None,
        skip_external: false,
    });

    match command {
        Commands::Build {
            path,
            output,
            skip_external,
        } => {
            build::execute(&config, &path, output, skip_external, cli.verbose).await?;
        }

        Commands::Scan { path, format } => {
            let format: ScanFormat = format.parse()?;
            scan::execute(&config, &path, format)?;
        }

        Commands::Compose {
            path,
            output,
            format,
            prefix,
        } => {
            let format: OutputFormat = format.parse()?;
            compose::execute(&config, &path, output, format, &prefix)?;
        }

        Commands::Config(config_cmd_inner) => {
            let mut config = config;
            match config_cmd_inner {
                ConfigCommands::Show => {
                    config_cmd::show(&config)?;
                }
                ConfigCommands::Set { key, value } => {
                    config_cmd::set(&mut config, &key, &value)?;
                }
                ConfigCommands::Get { key } => {
                    config_cmd::get(&config, &key)?;
                }
                ConfigCommands::Reset => {
                    config_cmd::reset()?;
                }
                ConfigCommands::Path => {
                    if let Some(path) = Config::config_file_path() {
                        println!("{}", path.display());
                    } else {
                        println!("(no config file path available)");
                    }
                }
            }
        }
    }

    Ok(())
}
