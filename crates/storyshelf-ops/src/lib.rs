//! Storyshelf Operations Layer
//!
//! This crate provides a typed API for turning a component library into a
//! docset manifest. It is consumed by the `shelf` CLI.
//!
//! ## Architecture
//!
//! - **Requests**: Typed input DTOs for each operation
//! - **Responses**: Typed output DTOs with all relevant data
//! - **OpsContext**: The main service that executes operations
//!
//! A build first asks the project's own story toolchain for its metadata
//! (see [`extract`]). When that is unavailable it walks the sources for story
//! modules and runs the `storyshelf-core` scanner over them.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use storyshelf_ops::{BuildRequest, Config, OpsContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = OpsContext::new(Config::load()?);
//!
//!     let response = ctx.build(BuildRequest::new(".").with_output("docset")).await?;
//!
//!     println!("{} entries ({})", response.entry_count(), response.source);
//!     Ok(())
//! }
//! ```

pub mod assets;
mod config;
mod context;
mod error;
pub mod extract;
pub mod manifest;
mod requests;
mod responses;
pub mod walk;

// Re-export public API
pub use config::Config;
pub use context::{write_manifest, OpsContext, MANIFEST_FILE};
pub use error::{OpsError, OpsResult};
pub use extract::StoryMeta;
pub use manifest::DocsetEntries;
pub use requests::*;
pub use responses::*;
pub use walk::{FileScanReport, ScanFailure, ScannedFile, WalkOptions};
