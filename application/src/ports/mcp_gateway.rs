//! MCP Gateway port
//!
//! Defines the interface for talking to a remote MCP server.

use async_trait::async_trait;
use mcpmap_domain::{ConnectionConfig, PromptRecord, ResourceRecord, ToolRecord};
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during MCP gateway operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Tool '{tool}' failed: {message}")]
    ToolCall { tool: String, message: String },

    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// Gateway for MCP communication
///
/// This port defines how the application layer reaches MCP servers.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait McpGateway: Send + Sync {
    /// Open an initialized session with the configured server
    async fn connect(&self, config: &ConnectionConfig) -> Result<Box<dyn McpSession>, GatewayError>;
}

/// An active MCP session
#[async_trait]
pub trait McpSession: Send + Sync {
    async fn list_tools(&self) -> Result<Vec<ToolRecord>, GatewayError>;

    async fn list_resources(&self) -> Result<Vec<ResourceRecord>, GatewayError>;

    async fn list_prompts(&self) -> Result<Vec<PromptRecord>, GatewayError>;

    /// Invoke a tool and return the raw call result as JSON
    async fn call_tool(&self, name: &str, arguments: Map<String, Value>)
    -> Result<Value, GatewayError>;

    /// Shut the session down. Further calls fail.
    async fn close(&self) -> Result<(), GatewayError>;
}
