//! Server connection settings

use crate::metadata::CacheKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_CLIENT_NAME: &str = "mcpmap";

/// Wire transport used to reach an MCP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Server-sent events
    Sse,
    /// Streamable HTTP
    #[serde(rename = "http", alias = "streamable", alias = "streamable-http")]
    StreamableHttp,
}

impl TransportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Sse => "sse",
            TransportKind::StreamableHttp => "http",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported transport type '{0}', supported: sse, http")]
pub struct UnknownTransport(pub String);

impl FromStr for TransportKind {
    type Err = UnknownTransport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sse" => Ok(TransportKind::Sse),
            "http" | "streamable" | "streamable-http" => Ok(TransportKind::StreamableHttp),
            other => Err(UnknownTransport(other.to_string())),
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where and how to reach one MCP server.
///
/// Everything except `proxy` feeds the [`CacheKey`], so two configurations
/// that only differ in proxy share a cache file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub server_url: String,
    pub transport: TransportKind,
    pub proxy: Option<String>,
    pub token: Option<String>,
    pub client_name: String,
}

impl ConnectionConfig {
    pub fn new(server_url: impl Into<String>, transport: TransportKind) -> Self {
        Self {
            server_url: server_url.into(),
            transport,
            proxy: None,
            token: None,
            client_name: DEFAULT_CLIENT_NAME.to_string(),
        }
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    pub fn cache_key(&self) -> CacheKey {
        CacheKey::derive(
            &self.server_url,
            self.transport.as_str(),
            self.token.as_deref().unwrap_or_default(),
            &self.client_name,
        )
    }
}
