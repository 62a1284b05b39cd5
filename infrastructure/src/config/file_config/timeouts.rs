//! Timeout configuration from TOML (`[timeouts]` section)

use mcpmap_application::ExecutionParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw timeouts from TOML, in whole seconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTimeoutsConfig {
    /// Deadline for live shell-completion queries
    pub completion_secs: u64,
    /// Deadline for fetching a tool schema before `exec`
    pub schema_secs: u64,
    /// HTTP connect timeout
    pub connect_secs: u64,
}

impl Default for FileTimeoutsConfig {
    fn default() -> Self {
        Self {
            completion_secs: 3,
            schema_secs: 2,
            connect_secs: 10,
        }
    }
}

impl FileTimeoutsConfig {
    /// Convert to application layer [`ExecutionParams`]
    pub fn to_execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_completion_timeout(Duration::from_secs(self.completion_secs))
            .with_schema_timeout(Duration::from_secs(self.schema_secs))
            .with_connect_timeout(Duration::from_secs(self.connect_secs))
    }
}
