//! Computer club simulator CLI library.
//!
//! This crate provides the CLI interface: argument parsing, configuration,
//! and report rendering.

mod cli;
mod config;
pub mod report;

pub use cli::Cli;
pub use config::{Config, OutputFormat};
