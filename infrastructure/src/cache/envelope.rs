//! On-disk cache file format
//!
//! ```json
//! {
//!   "version": 1,
//!   "timestamp": "2024-01-01T12:00:00Z",
//!   "server_info": {"name": "", "version": ""},
//!   "data": {"tools": [], "resources": [], "prompts": []}
//! }
//! ```

use chrono::{DateTime, Utc};
use mcpmap_domain::ServerMetadata;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const CACHE_VERSION: u64 = 1;

/// Why a cache file cannot be used.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("unsupported version {0:?}")]
    UnsupportedVersion(Option<u64>),

    #[error("invalid envelope: {0}")]
    InvalidEnvelope(#[source] serde_json::Error),
}

/// Reserved; written empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEnvelope {
    pub version: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub server_info: ServerInfo,
    pub data: ServerMetadata,
}

impl CacheEnvelope {
    pub fn wrap(data: ServerMetadata) -> Self {
        Self {
            version: CACHE_VERSION,
            timestamp: Utc::now(),
            server_info: ServerInfo::default(),
            data,
        }
    }

    /// Decode a cache file. The version is checked before the body.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_slice(bytes).map_err(DecodeError::InvalidJson)?;

        match value.get("version").and_then(Value::as_u64) {
            Some(CACHE_VERSION) => {}
            other => return Err(DecodeError::UnsupportedVersion(other)),
        }

        serde_json::from_value(value).map_err(DecodeError::InvalidEnvelope)
    }
}

/// Item counts of a cache file, for `cache info`.
///
/// Anything unparsable counts as zero items.
pub fn count_items(bytes: &[u8]) -> (usize, usize, usize) {
    #[derive(Deserialize)]
    struct Counted {
        #[serde(default)]
        tools: Vec<IgnoredAny>,
        #[serde(default)]
        resources: Vec<IgnoredAny>,
        #[serde(default)]
        prompts: Vec<IgnoredAny>,
    }

    #[derive(Deserialize)]
    struct Outer {
        data: Option<Counted>,
    }

    match serde_json::from_slice::<Outer>(bytes) {
        Ok(Outer { data: Some(data) }) => {
            (data.tools.len(), data.resources.len(), data.prompts.len())
        }
        _ => (0, 0, 0),
    }
}
