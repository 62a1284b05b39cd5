//! Configuration file loading for mcpmap
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `MCPMAP_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./mcpmap.toml` or `./.mcpmap.toml`
//! 4. Global: `<config_dir>/mcpmap/config.toml`
//! 5. Default values
//!
//! Command-line flags are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileCacheConfig, FileConfig, FileConnectionConfig, FileLoggingConfig,
    FileOutputConfig, FileOutputFormat, FileTimeoutsConfig,
};
pub use loader::ConfigLoader;
