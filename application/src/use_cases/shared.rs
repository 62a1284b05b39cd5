//! Shared utilities for use cases.
//!
//! Contains the full metadata fetch and the log-and-continue cache helpers
//! used across multiple use cases (LoadMetadata, ExecTool, Complete).

use crate::ports::mcp_gateway::{GatewayError, McpSession};
use crate::ports::metadata_cache::{CacheHit, MetadataCache};
use mcpmap_domain::{CacheKey, ServerMetadata};
use tracing::{debug, warn};

/// Fetch tools, resources and prompts concurrently.
///
/// A failing list yields an empty sequence; servers commonly implement only
/// a subset of the three.
pub(crate) async fn fetch_all(session: &dyn McpSession) -> ServerMetadata {
    let (tools, resources, prompts) = futures::join!(
        session.list_tools(),
        session.list_resources(),
        session.list_prompts()
    );

    ServerMetadata {
        tools: or_empty("tools", tools),
        resources: or_empty("resources", resources),
        prompts: or_empty("prompts", prompts),
    }
}

fn or_empty<T>(kind: &str, result: Result<Vec<T>, GatewayError>) -> Vec<T> {
    match result {
        Ok(items) => {
            debug!("Fetched {} {}", items.len(), kind);
            items
        }
        Err(e) => {
            debug!("Failed to list {}: {}", kind, e);
            Vec::new()
        }
    }
}

/// Close a session, logging instead of failing.
pub(crate) async fn close_quietly(session: Box<dyn McpSession>) {
    if let Err(e) = session.close().await {
        debug!("Failed to close MCP session: {}", e);
    }
}

/// Cache lookup where any error is downgraded to a miss.
pub(crate) fn load_cached(cache: &dyn MetadataCache, key: &CacheKey) -> Option<CacheHit> {
    match cache.load(key) {
        Ok(hit) => hit,
        Err(e) => {
            warn!("Ignoring unreadable cache entry {}: {}", key, e);
            None
        }
    }
}

/// Cache write whose failure is only logged.
pub(crate) fn store_quietly(cache: &dyn MetadataCache, key: &CacheKey, data: &ServerMetadata) {
    match cache.save(key, data) {
        Ok(()) => debug!("Cached metadata under {}", key),
        Err(e) => warn!("Failed to save cache entry {}: {}", key, e),
    }
}
