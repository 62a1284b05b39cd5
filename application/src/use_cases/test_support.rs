//! In-memory port implementations shared by the use case tests.

use crate::ports::mcp_gateway::{GatewayError, McpGateway, McpSession};
use crate::ports::metadata_cache::{CacheError, CacheHit, MetadataCache};
use async_trait::async_trait;
use mcpmap_domain::{
    CacheKey, ConnectionConfig, PromptRecord, ResourceRecord, ServerMetadata, ToolRecord,
};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub(crate) type RecordedCalls = Arc<Mutex<Vec<(String, Map<String, Value>)>>>;

pub(crate) struct MockGateway {
    metadata: ServerMetadata,
    reachable: bool,
    list_delay: Option<Duration>,
    pub(crate) calls: RecordedCalls,
    pub(crate) connects: AtomicUsize,
}

impl MockGateway {
    pub(crate) fn serving(metadata: ServerMetadata) -> Self {
        Self {
            metadata,
            reachable: true,
            list_delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
            connects: AtomicUsize::new(0),
        }
    }

    pub(crate) fn unreachable() -> Self {
        Self {
            reachable: false,
            ..Self::serving(ServerMetadata::default())
        }
    }

    /// Every list call sleeps this long before answering.
    pub(crate) fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = Some(delay);
        self
    }

    pub(crate) fn recorded_calls(&self) -> Vec<(String, Map<String, Value>)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl McpGateway for MockGateway {
    async fn connect(
        &self,
        _config: &ConnectionConfig,
    ) -> Result<Box<dyn McpSession>, GatewayError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if !self.reachable {
            return Err(GatewayError::Connection("connection refused".to_string()));
        }
        Ok(Box::new(MockSession {
            metadata: self.metadata.clone(),
            list_delay: self.list_delay,
            calls: self.calls.clone(),
        }))
    }
}

struct MockSession {
    metadata: ServerMetadata,
    list_delay: Option<Duration>,
    calls: RecordedCalls,
}

impl MockSession {
    async fn delay(&self) {
        if let Some(delay) = self.list_delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl McpSession for MockSession {
    async fn list_tools(&self) -> Result<Vec<ToolRecord>, GatewayError> {
        self.delay().await;
        Ok(self.metadata.tools.clone())
    }

    async fn list_resources(&self) -> Result<Vec<ResourceRecord>, GatewayError> {
        self.delay().await;
        Ok(self.metadata.resources.clone())
    }

    async fn list_prompts(&self) -> Result<Vec<PromptRecord>, GatewayError> {
        self.delay().await;
        Err(GatewayError::Protocol("method not found".to_string()))
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<Value, GatewayError> {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), arguments));
        Ok(json!({"content": [{"type": "text", "text": format!("called {name}")}]}))
    }

    async fn close(&self) -> Result<(), GatewayError> {
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct MemoryCache {
    entries: Mutex<HashMap<CacheKey, ServerMetadata>>,
}

impl MemoryCache {
    pub(crate) fn with_entry(key: CacheKey, data: ServerMetadata) -> Self {
        let cache = Self::default();
        cache.entries.lock().unwrap().insert(key, data);
        cache
    }

    pub(crate) fn get(&self, key: &CacheKey) -> Option<ServerMetadata> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

impl MetadataCache for MemoryCache {
    fn load(&self, key: &CacheKey) -> Result<Option<CacheHit>, CacheError> {
        Ok(self.get(key).map(CacheHit::fresh))
    }

    fn save(&self, key: &CacheKey, data: &ServerMetadata) -> Result<(), CacheError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.clone(), data.clone());
        Ok(())
    }

    fn delete(&self, key: &CacheKey) -> Result<(), CacheError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// A cache whose storage is unusable: every load and save fails.
#[derive(Default)]
pub(crate) struct FailingCache {
    pub(crate) saves: AtomicUsize,
}

impl FailingCache {
    fn broken(key: &CacheKey) -> CacheError {
        CacheError::Io {
            path: PathBuf::from(format!("/unwritable/{}", key.file_name())),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        }
    }

    pub(crate) fn save_attempts(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl MetadataCache for FailingCache {
    fn load(&self, key: &CacheKey) -> Result<Option<CacheHit>, CacheError> {
        Err(Self::broken(key))
    }

    fn save(&self, key: &CacheKey, _data: &ServerMetadata) -> Result<(), CacheError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        Err(Self::broken(key))
    }

    fn delete(&self, key: &CacheKey) -> Result<(), CacheError> {
        Err(Self::broken(key))
    }
}

pub(crate) fn search_tool() -> ToolRecord {
    ToolRecord::new("search")
        .with_description("Search documents")
        .with_input_schema(json!({
            "type": "object",
            "properties": {
                "query": {"type": "string"},
                "limit": {"type": "integer", "default": 10},
                "fuzzy": {"type": "boolean"}
            },
            "required": ["query"]
        }))
}

pub(crate) fn sample_metadata() -> ServerMetadata {
    ServerMetadata {
        tools: vec![search_tool(), ToolRecord::new("summarize")],
        resources: vec![ResourceRecord::new("file:///readme.md", "readme")],
        prompts: Vec::new(),
    }
}

pub(crate) fn connection() -> ConnectionConfig {
    ConnectionConfig::new(
        "https://example.com/mcp",
        mcpmap_domain::TransportKind::StreamableHttp,
    )
}
