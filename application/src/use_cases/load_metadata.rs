//! Load Server Metadata use case.
//!
//! Fetches everything a server advertises, refreshing the cache on success
//! and falling back to the cached snapshot when the server is unreachable.

use crate::ports::mcp_gateway::{GatewayError, McpGateway};
use crate::ports::metadata_cache::MetadataCache;
use crate::use_cases::shared::{close_quietly, fetch_all, load_cached, store_quietly};
use mcpmap_domain::{ConnectionConfig, ServerMetadata};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while loading metadata.
#[derive(Error, Debug)]
pub enum LoadMetadataError {
    #[error("create session: {0}")]
    Unavailable(#[from] GatewayError),
}

/// Where the returned metadata came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataSource {
    Live,
    /// The server was unreachable; data is the last cached snapshot.
    Cache,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedMetadata {
    pub data: ServerMetadata,
    pub source: MetadataSource,
}

/// Use case for loading a server's tools, resources and prompts.
///
/// 1. Read the cached snapshot (errors downgraded to a miss)
/// 2. Connect; on failure return the snapshot, or the error if there is none
/// 3. Fetch all three lists concurrently and overwrite the snapshot
#[derive(Clone)]
pub struct LoadMetadataUseCase {
    gateway: Arc<dyn McpGateway>,
    cache: Arc<dyn MetadataCache>,
}

impl LoadMetadataUseCase {
    pub fn new(gateway: Arc<dyn McpGateway>, cache: Arc<dyn MetadataCache>) -> Self {
        Self { gateway, cache }
    }

    pub async fn execute(
        &self,
        config: &ConnectionConfig,
    ) -> Result<LoadedMetadata, LoadMetadataError> {
        let key = config.cache_key();
        let cached = load_cached(self.cache.as_ref(), &key);

        let session = match self.gateway.connect(config).await {
            Ok(session) => session,
            Err(e) => {
                return match cached {
                    Some(hit) => {
                        warn!("Server unavailable ({}), using cached data", e);
                        Ok(LoadedMetadata {
                            data: hit.data,
                            source: MetadataSource::Cache,
                        })
                    }
                    None => Err(e.into()),
                };
            }
        };

        let data = fetch_all(session.as_ref()).await;
        close_quietly(session).await;

        info!(
            "Loaded {} tools, {} resources, {} prompts from {}",
            data.tools.len(),
            data.resources.len(),
            data.prompts.len(),
            config.server_url
        );

        store_quietly(self.cache.as_ref(), &key, &data);

        Ok(LoadedMetadata {
            data,
            source: MetadataSource::Live,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{
        FailingCache, MemoryCache, MockGateway, connection, sample_metadata,
    };
    use mcpmap_domain::ToolRecord;

    #[tokio::test]
    async fn test_live_fetch_refreshes_cache() {
        let cache = Arc::new(MemoryCache::default());
        let use_case = LoadMetadataUseCase::new(
            Arc::new(MockGateway::serving(sample_metadata())),
            cache.clone(),
        );

        let loaded = use_case.execute(&connection()).await.unwrap();

        assert_eq!(loaded.source, MetadataSource::Live);
        assert_eq!(loaded.data.tools.len(), 2);
        assert_eq!(loaded.data.resources.len(), 1);
        // The mock server rejects prompts/list; that list is simply empty.
        assert!(loaded.data.prompts.is_empty());
        assert_eq!(cache.get(&connection().cache_key()), Some(loaded.data));
    }

    #[tokio::test]
    async fn test_unreachable_server_falls_back_to_cache() {
        let snapshot = ServerMetadata {
            tools: vec![ToolRecord::new("cached-tool")],
            ..Default::default()
        };
        let cache = Arc::new(MemoryCache::with_entry(
            connection().cache_key(),
            snapshot.clone(),
        ));
        let use_case = LoadMetadataUseCase::new(Arc::new(MockGateway::unreachable()), cache);

        let loaded = use_case.execute(&connection()).await.unwrap();

        assert_eq!(loaded.source, MetadataSource::Cache);
        assert_eq!(loaded.data, snapshot);
    }

    #[tokio::test]
    async fn test_unreachable_server_without_cache_fails() {
        let use_case = LoadMetadataUseCase::new(
            Arc::new(MockGateway::unreachable()),
            Arc::new(MemoryCache::default()),
        );

        let err = use_case.execute(&connection()).await.unwrap_err();
        assert!(matches!(
            err,
            LoadMetadataError::Unavailable(GatewayError::Connection(_))
        ));
    }

    #[tokio::test]
    async fn test_live_data_replaces_stale_snapshot() {
        let key = connection().cache_key();
        let stale = ServerMetadata {
            tools: vec![ToolRecord::new("old")],
            ..Default::default()
        };
        let cache = Arc::new(MemoryCache::with_entry(key.clone(), stale));
        let use_case = LoadMetadataUseCase::new(
            Arc::new(MockGateway::serving(sample_metadata())),
            cache.clone(),
        );

        let loaded = use_case.execute(&connection()).await.unwrap();

        assert_eq!(loaded.source, MetadataSource::Live);
        assert!(cache.get(&key).unwrap().find_tool("old").is_none());
    }

    #[tokio::test]
    async fn test_broken_cache_does_not_block_live_fetch() {
        let cache = Arc::new(FailingCache::default());
        let use_case = LoadMetadataUseCase::new(
            Arc::new(MockGateway::serving(sample_metadata())),
            cache.clone(),
        );

        let loaded = use_case.execute(&connection()).await.unwrap();

        assert_eq!(loaded.source, MetadataSource::Live);
        assert_eq!(loaded.data.tools.len(), 2);
        assert_eq!(cache.save_attempts(), 1);
    }

    #[tokio::test]
    async fn test_broken_cache_and_unreachable_server_reports_connection_error() {
        let use_case = LoadMetadataUseCase::new(
            Arc::new(MockGateway::unreachable()),
            Arc::new(FailingCache::default()),
        );

        let err = use_case.execute(&connection()).await.unwrap_err();
        assert!(matches!(
            err,
            LoadMetadataError::Unavailable(GatewayError::Connection(_))
        ));
    }
}
