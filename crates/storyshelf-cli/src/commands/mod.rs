//! CLI command implementations.

pub mod build;
pub mod compose;
pub mod config;
pub mod scan;
