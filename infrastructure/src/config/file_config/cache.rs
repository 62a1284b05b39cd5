//! Cache configuration from TOML (`[cache]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw cache configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCacheConfig {
    /// Read and write server metadata snapshots
    pub enabled: bool,
    /// Override for the cache directory
    pub dir: Option<PathBuf>,
}

impl Default for FileCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}
