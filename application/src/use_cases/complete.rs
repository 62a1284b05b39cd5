//! Complete use case.
//!
//! Answers shell-completion queries (tool names, `name=` parameter stubs).
//! Completion must stay responsive, so the cached snapshot is preferred and
//! a live query is bounded by `completion_timeout`. A successful live query
//! refreshes the cache from a detached task.

use crate::config::ExecutionParams;
use crate::ports::mcp_gateway::{GatewayError, McpGateway};
use crate::ports::metadata_cache::MetadataCache;
use crate::use_cases::shared::{close_quietly, fetch_all, load_cached, store_quietly};
use mcpmap_domain::{CacheKey, ConnectionConfig, SchemaExtractor, ServerMetadata};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::debug;

/// Use case for completion candidates.
///
/// Never fails: any error yields no candidates.
#[derive(Clone)]
pub struct CompleteUseCase {
    gateway: Arc<dyn McpGateway>,
    cache: Arc<dyn MetadataCache>,
    params: ExecutionParams,
}

impl CompleteUseCase {
    pub fn new(gateway: Arc<dyn McpGateway>, cache: Arc<dyn MetadataCache>) -> Self {
        Self {
            gateway,
            cache,
            params: ExecutionParams::default(),
        }
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    /// Tool names starting with `prefix`.
    pub async fn tools(&self, config: &ConnectionConfig, prefix: &str) -> Vec<String> {
        let Some(metadata) = self.metadata(config).await else {
            return Vec::new();
        };

        metadata
            .tools
            .iter()
            .filter(|tool| tool.name.starts_with(prefix))
            .map(|tool| tool.name.clone())
            .collect()
    }

    /// `name=` stubs for the parameters of `tool` whose name starts with
    /// `prefix`.
    pub async fn params(&self, config: &ConnectionConfig, tool: &str, prefix: &str) -> Vec<String> {
        let Some(metadata) = self.metadata(config).await else {
            return Vec::new();
        };
        let Some(record) = metadata.find_tool(tool) else {
            return Vec::new();
        };

        match SchemaExtractor::extract(record.raw_schema().as_ref()) {
            Ok(schema) => schema
                .parameter_names()
                .filter(|name| name.starts_with(prefix))
                .map(|name| format!("{name}="))
                .collect(),
            Err(e) => {
                debug!("Unusable schema for tool '{}': {}", tool, e);
                Vec::new()
            }
        }
    }

    async fn metadata(&self, config: &ConnectionConfig) -> Option<ServerMetadata> {
        let key = config.cache_key();
        if let Some(hit) = load_cached(self.cache.as_ref(), &key) {
            debug!("Completing from cache entry {}", key);
            return Some(hit.data);
        }

        let live = match timeout(self.params.completion_timeout, self.fetch_live(config)).await {
            Ok(Ok(data)) => data,
            Ok(Err(e)) => {
                debug!("Completion query failed: {}", e);
                return None;
            }
            Err(_) => {
                debug!(
                    "Completion query timed out after {:?}",
                    self.params.completion_timeout
                );
                return None;
            }
        };

        // Detached: the completion answer does not wait for the write.
        drop(spawn_refresh(self.cache.clone(), key, live.clone()));
        Some(live)
    }

    async fn fetch_live(&self, config: &ConnectionConfig) -> Result<ServerMetadata, GatewayError> {
        let session = self.gateway.connect(config).await?;
        let data = fetch_all(session.as_ref()).await;
        close_quietly(session).await;
        Ok(data)
    }
}

/// Persist a captured snapshot on the blocking pool.
///
/// Cache writes are synchronous file I/O and must not stall a runtime worker.
fn spawn_refresh(
    cache: Arc<dyn MetadataCache>,
    key: CacheKey,
    data: ServerMetadata,
) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || store_quietly(cache.as_ref(), &key, &data))
}
