//! rmcp-backed [`McpGateway`] adapter

use super::http::build_http_client;
use async_trait::async_trait;
use mcpmap_application::{GatewayError, McpGateway, McpSession};
use mcpmap_domain::{ConnectionConfig, PromptRecord, ResourceRecord, ToolRecord, TransportKind};
use rmcp::model::{CallToolRequestParam, ClientInfo, Implementation};
use rmcp::service::{Peer, RunningService};
use rmcp::transport::{
    SseClientTransport, StreamableHttpClientTransport, sse_client::SseClientConfig,
    streamable_http_client::StreamableHttpClientTransportConfig,
};
use rmcp::{RoleClient, ServiceExt};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

type McpClient = RunningService<RoleClient, ClientInfo>;

/// Connects to MCP servers over SSE or streamable HTTP.
#[derive(Debug, Clone)]
pub struct RmcpGateway {
    connect_timeout: Duration,
}

impl RmcpGateway {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl Default for RmcpGateway {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

/// Initialize request payload announcing `client_name`.
fn client_info(client_name: &str) -> ClientInfo {
    ClientInfo {
        protocol_version: Default::default(),
        capabilities: Default::default(),
        client_info: Implementation {
            name: client_name.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            ..Implementation::from_build_env()
        },
    }
}

#[async_trait]
impl McpGateway for RmcpGateway {
    async fn connect(&self, config: &ConnectionConfig) -> Result<Box<dyn McpSession>, GatewayError> {
        let http = build_http_client(config, self.connect_timeout)?;
        let handler = client_info(&config.client_name);
        let url = config.server_url.as_str();

        let client: McpClient = match config.transport {
            TransportKind::Sse => {
                let cfg = SseClientConfig {
                    sse_endpoint: url.to_string().into(),
                    ..Default::default()
                };
                let transport = SseClientTransport::start_with_client(http, cfg)
                    .await
                    .map_err(|e| GatewayError::Transport(format!("create SSE transport: {e}")))?;

                handler.serve(transport).await.map_err(|e| {
                    GatewayError::Connection(format!("initialize SSE client: {e}"))
                })?
            }
            TransportKind::StreamableHttp => {
                let cfg = StreamableHttpClientTransportConfig::with_uri(url.to_string());
                let transport = StreamableHttpClientTransport::with_client(http, cfg);

                handler.serve(transport).await.map_err(|e| {
                    GatewayError::Connection(format!("initialize streamable client: {e}"))
                })?
            }
        };

        info!("Connected to {} server at {}", config.transport, url);
        Ok(Box::new(RmcpSession::new(client)))
    }
}

/// One initialized MCP client session.
pub struct RmcpSession {
    peer: Peer<RoleClient>,
    service: Mutex<Option<McpClient>>,
}

impl RmcpSession {
    fn new(client: McpClient) -> Self {
        Self {
            peer: client.peer().clone(),
            service: Mutex::new(Some(client)),
        }
    }
}

/// Re-shape an rmcp model value into one of our wire-compatible records.
fn to_record<T: Serialize, R: DeserializeOwned>(item: &T) -> Result<R, GatewayError> {
    serde_json::to_value(item)
        .and_then(serde_json::from_value)
        .map_err(|e| GatewayError::Protocol(format!("unexpected server payload: {e}")))
}

fn to_records<T: Serialize, R: DeserializeOwned>(items: &[T]) -> Result<Vec<R>, GatewayError> {
    items.iter().map(to_record).collect()
}

#[async_trait]
impl McpSession for RmcpSession {
    async fn list_tools(&self) -> Result<Vec<ToolRecord>, GatewayError> {
        let tools = self
            .peer
            .list_all_tools()
            .await
            .map_err(|e| GatewayError::Protocol(format!("list tools: {e}")))?;
        to_records(&tools)
    }

    async fn list_resources(&self) -> Result<Vec<ResourceRecord>, GatewayError> {
        let resources = self
            .peer
            .list_all_resources()
            .await
            .map_err(|e| GatewayError::Protocol(format!("list resources: {e}")))?;
        to_records(&resources)
    }

    async fn list_prompts(&self) -> Result<Vec<PromptRecord>, GatewayError> {
        let prompts = self
            .peer
            .list_all_prompts()
            .await
            .map_err(|e| GatewayError::Protocol(format!("list prompts: {e}")))?;
        to_records(&prompts)
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<Value, GatewayError> {
        let request = CallToolRequestParam {
            name: Cow::Owned(name.to_string()),
            arguments: Some(arguments),
        };

        let result = self
            .peer
            .call_tool(request)
            .await
            .map_err(|e| GatewayError::ToolCall {
                tool: name.to_string(),
                message: e.to_string(),
            })?;

        if result.is_error.unwrap_or_default() {
            warn!("Tool '{}' reported an error result", name);
        }

        serde_json::to_value(&result)
            .map_err(|e| GatewayError::Protocol(format!("encode tool result: {e}")))
    }

    async fn close(&self) -> Result<(), GatewayError> {
        let Some(client) = self.service.lock().await.take() else {
            return Ok(());
        };

        client
            .cancel()
            .await
            .map(|reason| debug!("MCP session closed: {:?}", reason))
            .map_err(|e| GatewayError::Connection(format!("close session: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::{Tool, object};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_client_info_carries_name() {
        let info = client_info("my-client");
        assert_eq!(info.client_info.name, "my-client");
        assert_eq!(info.client_info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_tool_converts_to_record() {
        let schema = object(json!({
            "type": "object",
            "properties": {"q": {"type": "string"}},
            "required": ["q"]
        }));
        let tool = Tool::new("search", "Search documents", Arc::new(schema));

        let record: ToolRecord = to_record(&tool).unwrap();

        assert_eq!(record.name, "search");
        assert_eq!(record.description.as_deref(), Some("Search documents"));
        assert_eq!(record.input_schema.unwrap()["required"], json!(["q"]));
    }

    #[tokio::test]
    async fn test_unreachable_server_fails_to_connect() {
        let gateway = RmcpGateway::new(Duration::from_millis(200));
        let config = ConnectionConfig::new("http://127.0.0.1:1/mcp", TransportKind::StreamableHttp);

        let result = tokio::time::timeout(Duration::from_secs(5), gateway.connect(&config)).await;
        assert!(!matches!(result, Ok(Ok(_))));
    }
}
