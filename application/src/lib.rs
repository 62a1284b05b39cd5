//! Application layer for mcpmap
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    mcp_gateway::{GatewayError, McpGateway, McpSession},
    metadata_cache::{
        CacheError, CacheFileInfo, CacheHit, CacheInfo, CacheMaintenance, MetadataCache,
        NoMetadataCache,
    },
};
pub use use_cases::complete::CompleteUseCase;
pub use use_cases::exec_tool::{ExecToolError, ExecToolInput, ExecToolOutput, ExecToolUseCase};
pub use use_cases::load_metadata::{
    LoadMetadataError, LoadMetadataUseCase, LoadedMetadata, MetadataSource,
};
pub use use_cases::manage_cache::ManageCacheUseCase;
