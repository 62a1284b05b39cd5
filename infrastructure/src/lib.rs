//! Infrastructure layer for mcpmap
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the rmcp-based MCP client, the on-disk
//! metadata cache, configuration file loading and logging setup.

pub mod cache;
pub mod config;
pub mod logging;
pub mod mcp;

// Re-export commonly used types
pub use cache::{
    CACHE_VERSION, CacheDirectory, CacheEnvelope, DecodeError, FileMetadataCache,
    default_cache_dir, resolve_cache_dir,
};
pub use config::{
    ConfigLoader, ConfigValidationError, FileCacheConfig, FileConfig, FileConnectionConfig,
    FileLoggingConfig, FileOutputConfig, FileOutputFormat, FileTimeoutsConfig,
};
pub use logging::{init_logging, level_for_verbosity};
pub use mcp::{RmcpGateway, RmcpSession};
