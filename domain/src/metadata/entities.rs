//! Server metadata records
//!
//! Records mirror what an MCP server advertises. Fields we do not model are
//! kept in `extra` so a snapshot written by a newer server survives a
//! load/save cycle unchanged.

use crate::schema::RawSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// One invokable tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "inputSchema", default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ToolRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            input_schema: None,
            extra: Map::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_input_schema(mut self, schema: Value) -> Self {
        self.input_schema = Some(schema);
        self
    }

    /// Input schema wrapped for [`SchemaExtractor`](crate::schema::SchemaExtractor).
    pub fn raw_schema(&self) -> Option<RawSchema> {
        self.input_schema.clone().map(RawSchema::from)
    }
}

/// One readable resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub uri: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "mimeType", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceRecord {
    pub fn new(uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            title: None,
            description: None,
            mime_type: None,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptArgument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// One prompt template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<PromptArgument>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PromptRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            arguments: Vec::new(),
            extra: Map::new(),
        }
    }
}

/// Everything a server advertises, as persisted in the cache `data` field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerMetadata {
    #[serde(default)]
    pub tools: Vec<ToolRecord>,
    #[serde(default)]
    pub resources: Vec<ResourceRecord>,
    #[serde(default)]
    pub prompts: Vec<PromptRecord>,
}

impl ServerMetadata {
    pub fn find_tool(&self, name: &str) -> Option<&ToolRecord> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty() && self.resources.is_empty() && self.prompts.is_empty()
    }
}

/// Which metadata category a `list` request covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MetadataKind {
    #[default]
    All,
    Tools,
    Resources,
    Prompts,
}

impl MetadataKind {
    pub fn includes(&self, other: MetadataKind) -> bool {
        *self == MetadataKind::All || *self == other
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown list type '{0}', supported types: tools, resources, prompts")]
pub struct UnknownMetadataKind(pub String);

impl FromStr for MetadataKind {
    type Err = UnknownMetadataKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(MetadataKind::All),
            "tools" => Ok(MetadataKind::Tools),
            "resources" => Ok(MetadataKind::Resources),
            "prompts" => Ok(MetadataKind::Prompts),
            other => Err(UnknownMetadataKind(other.to_string())),
        }
    }
}

impl fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MetadataKind::All => "all",
            MetadataKind::Tools => "tools",
            MetadataKind::Resources => "resources",
            MetadataKind::Prompts => "prompts",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_record_wire_names() {
        let tool = ToolRecord::new("search").with_input_schema(json!({"type": "object"}));
        let value = serde_json::to_value(&tool).unwrap();
        assert_eq!(value, json!({"name": "search", "inputSchema": {"type": "object"}}));
    }

    #[test]
    fn test_unknown_fields_survive_roundtrip() {
        let raw = json!({
            "name": "search",
            "inputSchema": {"type": "object"},
            "annotations": {"readOnlyHint": true}
        });
        let tool: ToolRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(tool.extra["annotations"], json!({"readOnlyHint": true}));
        assert_eq!(serde_json::to_value(&tool).unwrap(), raw);
    }

    #[test]
    fn test_resource_and_prompt_records() {
        let resource: ResourceRecord = serde_json::from_value(json!({
            "uri": "file:///readme.md",
            "name": "readme",
            "mimeType": "text/markdown"
        }))
        .unwrap();
        assert_eq!(resource.mime_type.as_deref(), Some("text/markdown"));

        let prompt: PromptRecord = serde_json::from_value(json!({
            "name": "summarize",
            "arguments": [{"name": "text", "required": true}]
        }))
        .unwrap();
        assert_eq!(prompt.arguments[0].required, Some(true));
    }

    #[test]
    fn test_find_tool() {
        let metadata = ServerMetadata {
            tools: vec![ToolRecord::new("a"), ToolRecord::new("b")],
            ..Default::default()
        };
        assert_eq!(metadata.find_tool("b").unwrap().name, "b");
        assert!(metadata.find_tool("c").is_none());
        assert!(!metadata.is_empty());
    }

    #[test]
    fn test_metadata_kind_parse() {
        assert_eq!("tools".parse::<MetadataKind>().unwrap(), MetadataKind::Tools);
        assert_eq!("".parse::<MetadataKind>().unwrap(), MetadataKind::All);
        let err = "widgets".parse::<MetadataKind>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown list type 'widgets', supported types: tools, resources, prompts"
        );
    }

    #[test]
    fn test_metadata_kind_includes() {
        assert!(MetadataKind::All.includes(MetadataKind::Prompts));
        assert!(MetadataKind::Tools.includes(MetadataKind::Tools));
        assert!(!MetadataKind::Tools.includes(MetadataKind::Resources));
    }
}
