//! Presentation layer for mcpmap
//!
//! This crate contains the CLI definition, shell completion generation
//! and console output formatting.

pub mod cli;
pub mod config;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{
    CacheAction, Cli, Command, CompleteTarget, ServerFlagsError, write_completion_script,
};
pub use config::OutputConfig;
pub use output::console::ConsoleFormatter;
