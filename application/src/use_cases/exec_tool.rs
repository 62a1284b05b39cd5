//! Exec Tool use case.
//!
//! Resolves the tool's input schema, converts the raw `name=value`
//! arguments against it, and only then invokes the tool.

use crate::config::ExecutionParams;
use crate::ports::mcp_gateway::{GatewayError, McpGateway, McpSession};
use crate::ports::metadata_cache::MetadataCache;
use crate::use_cases::load_metadata::MetadataSource;
use crate::use_cases::shared::{close_quietly, load_cached};
use mcpmap_domain::{
    ConnectionConfig, ParamError, SchemaExtractor, ToolRecord, ToolSchema, parse_params,
};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Errors that can occur during tool execution.
#[derive(Error, Debug)]
pub enum ExecToolError {
    #[error(transparent)]
    Params(#[from] ParamError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Input for the [`ExecToolUseCase`].
#[derive(Debug, Clone)]
pub struct ExecToolInput {
    pub connection: ConnectionConfig,
    pub tool: String,
    /// Raw `name=value` arguments as typed on the command line.
    pub args: Vec<String>,
}

impl ExecToolInput {
    pub fn new(connection: ConnectionConfig, tool: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            connection,
            tool: tool.into(),
            args,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExecToolOutput {
    /// Raw call result as returned by the server.
    pub result: Value,
    /// Non-fatal notices from argument parsing.
    pub warnings: Vec<String>,
    /// Where the schema came from; `None` when the tool was not found.
    pub schema_source: Option<MetadataSource>,
}

/// Use case for invoking one tool.
///
/// 1. Connect to the server
/// 2. Look the tool up in a live `tools/list` (bounded by `schema_timeout`),
///    falling back to the cached snapshot
/// 3. Convert and validate the arguments; any failure aborts here
/// 4. Call the tool
#[derive(Clone)]
pub struct ExecToolUseCase {
    gateway: Arc<dyn McpGateway>,
    cache: Arc<dyn MetadataCache>,
    params: ExecutionParams,
}

impl ExecToolUseCase {
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

    pub async fn execute(&self, input: ExecToolInput) -> Result<ExecToolOutput, ExecToolError> {
        let session = self.gateway.connect(&input.connection).await?;
        let result = self.run(session.as_ref(), &input).await;
        close_quietly(session).await;
        result
    }

    async fn run(
        &self,
        session: &dyn McpSession,
        input: &ExecToolInput,
    ) -> Result<ExecToolOutput, ExecToolError> {
        let (tool, schema_source) = self.resolve_tool(session, input).await;

        let schema = match &tool {
            Some(tool) => {
                SchemaExtractor::extract(tool.raw_schema().as_ref()).map_err(ParamError::from)?
            }
            None => {
                warn!(
                    "No schema found for tool '{}', parameters are sent as strings",
                    input.tool
                );
                ToolSchema::new()
            }
        };

        let parsed = parse_params(&input.args, &schema)?;
        debug!("Converted parameters: {:?}", parsed.values);

        info!("Calling tool '{}'", input.tool);
        let result = session.call_tool(&input.tool, parsed.values).await?;

        Ok(ExecToolOutput {
            result,
            warnings: parsed.warnings,
            schema_source,
        })
    }

    async fn resolve_tool(
        &self,
        session: &dyn McpSession,
        input: &ExecToolInput,
    ) -> (Option<ToolRecord>, Option<MetadataSource>) {
        match timeout(self.params.schema_timeout, session.list_tools()).await {
            Ok(Ok(tools)) => {
                if let Some(tool) = tools.into_iter().find(|t| t.name == input.tool) {
                    return (Some(tool), Some(MetadataSource::Live));
                }
                debug!("Tool '{}' not in live tool list", input.tool);
            }
            Ok(Err(e)) => debug!("Live tool list failed: {}", e),
            Err(_) => debug!(
                "Live tool list timed out after {:?}",
                self.params.schema_timeout
            ),
        }

        let key = input.connection.cache_key();
        load_cached(self.cache.as_ref(), &key)
            .and_then(|hit| hit.data.find_tool(&input.tool).cloned())
            .map_or((None, None), |tool| (Some(tool), Some(MetadataSource::Cache)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{
        FailingCache, MemoryCache, MockGateway, connection, sample_metadata, search_tool,
    };
    use mcpmap_domain::{ConversionError, ServerMetadata};
    use serde_json::json;
    use std::time::Duration;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_converts_arguments_with_live_schema() {
        let gateway = Arc::new(MockGateway::serving(sample_metadata()));
        let use_case = ExecToolUseCase::new(gateway.clone(), Arc::new(MemoryCache::default()));

        let output = use_case
            .execute(ExecToolInput::new(
                connection(),
                "search",
                args(&["query=rust", "limit=5", "fuzzy=yes"]),
            ))
            .await
            .unwrap();

        assert_eq!(output.schema_source, Some(MetadataSource::Live));
        assert!(output.warnings.is_empty());
        let calls = gateway.recorded_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "search");
        assert_eq!(
            Value::Object(calls[0].1.clone()),
            json!({"query": "rust", "limit": 5, "fuzzy": true})
        );
    }

    #[tokio::test]
    async fn test_conversion_failure_aborts_before_call() {
        let gateway = Arc::new(MockGateway::serving(sample_metadata()));
        let use_case = ExecToolUseCase::new(gateway.clone(), Arc::new(MemoryCache::default()));

        let err = use_case
            .execute(ExecToolInput::new(
                connection(),
                "search",
                args(&["query=rust", "limit=3.14"]),
            ))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ExecToolError::Params(ParamError::Conversion(ConversionError::Type { .. }))
        ));
        assert!(gateway.recorded_calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_required_aborts_before_call() {
        let gateway = Arc::new(MockGateway::serving(sample_metadata()));
        let use_case = ExecToolUseCase::new(gateway.clone(), Arc::new(MemoryCache::default()));

        let err = use_case
            .execute(ExecToolInput::new(connection(), "search", args(&["limit=1"])))
            .await
            .unwrap_err();

        match err {
            ExecToolError::Params(e) => assert_eq!(e.missing(), ["query".to_string()]),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(gateway.recorded_calls().is_empty());
    }

    #[tokio::test]
    async fn test_slow_tool_list_falls_back_to_cached_schema() {
        // The live server answers too slowly and advertises nothing useful.
        let gateway = Arc::new(
            MockGateway::serving(ServerMetadata::default()).with_list_delay(Duration::from_secs(5)),
        );
        let cache = Arc::new(MemoryCache::with_entry(
            connection().cache_key(),
            ServerMetadata {
                tools: vec![search_tool()],
                ..Default::default()
            },
        ));
        let use_case = ExecToolUseCase::new(gateway.clone(), cache).with_params(
            ExecutionParams::default().with_schema_timeout(Duration::from_millis(50)),
        );

        let output = use_case
            .execute(ExecToolInput::new(
                connection(),
                "search",
                args(&["query=q", "limit="]),
            ))
            .await
            .unwrap();

        assert_eq!(output.schema_source, Some(MetadataSource::Cache));
        // Empty value picks up the declared default.
        assert_eq!(gateway.recorded_calls()[0].1["limit"], json!(10));
    }

    #[tokio::test]
    async fn test_unknown_tool_sends_strings_with_warnings() {
        let gateway = Arc::new(MockGateway::serving(sample_metadata()));
        let use_case = ExecToolUseCase::new(gateway.clone(), Arc::new(MemoryCache::default()));

        let output = use_case
            .execute(ExecToolInput::new(connection(), "mystery", args(&["n=1"])))
            .await
            .unwrap();

        assert_eq!(output.schema_source, None);
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(gateway.recorded_calls()[0].1["n"], json!("1"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_error() {
        let use_case = ExecToolUseCase::new(
            Arc::new(MockGateway::unreachable()),
            Arc::new(MemoryCache::default()),
        );

        let err = use_case
            .execute(ExecToolInput::new(connection(), "search", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, ExecToolError::Gateway(GatewayError::Connection(_))));
    }

    #[tokio::test]
    async fn test_broken_cache_still_calls_tool() {
        let gateway = Arc::new(MockGateway::serving(sample_metadata()));
        let use_case = ExecToolUseCase::new(gateway.clone(), Arc::new(FailingCache::default()));

        // Not in the live list, so the cache is consulted and fails.
        let output = use_case
            .execute(ExecToolInput::new(connection(), "mystery", args(&["n=1"])))
            .await
            .unwrap();

        assert_eq!(output.schema_source, None);
        let calls = gateway.recorded_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "mystery");
        assert_eq!(calls[0].1["n"], json!("1"));
    }

    #[tokio::test]
    async fn test_broken_cache_with_slow_tool_list_still_calls_tool() {
        let gateway = Arc::new(
            MockGateway::serving(sample_metadata()).with_list_delay(Duration::from_secs(5)),
        );
        let use_case = ExecToolUseCase::new(gateway.clone(), Arc::new(FailingCache::default()))
            .with_params(ExecutionParams::default().with_schema_timeout(Duration::from_millis(50)));

        let output = use_case
            .execute(ExecToolInput::new(connection(), "search", args(&["query=q"])))
            .await
            .unwrap();

        assert_eq!(output.schema_source, None);
        assert_eq!(gateway.recorded_calls()[0].1["query"], json!("q"));
    }
}
