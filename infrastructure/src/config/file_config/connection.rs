//! Connection configuration from TOML (`[connection]` section)

use mcpmap_domain::DEFAULT_CLIENT_NAME;
use serde::{Deserialize, Serialize};

/// Raw connection defaults from TOML
///
/// The server URL itself always comes from `--sse` / `--http`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConnectionConfig {
    /// Client name sent in the MCP initialize request
    pub client_name: String,
    /// HTTP proxy URL
    pub proxy: Option<String>,
    /// Bearer token for authentication
    pub token: Option<String>,
}

impl Default for FileConnectionConfig {
    fn default() -> Self {
        Self {
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            proxy: None,
            token: None,
        }
    }
}
