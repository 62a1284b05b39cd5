//! Metadata cache port
//!
//! Durable storage of one [`ServerMetadata`] snapshot per connection
//! fingerprint ([`CacheKey`]).

use chrono::{DateTime, Utc};
use mcpmap_domain::{CacheKey, ServerMetadata};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from the metadata cache
///
/// `Corrupt` is handled inside `load` (the file is removed and the call
/// reports a miss), so callers never see it from there.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache directory error at {path}: {source}")]
    Directory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cache I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cache serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Cache file {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}

/// A cached snapshot.
///
/// No staleness model exists, so any hit is fresh.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheHit {
    pub data: ServerMetadata,
    pub is_fresh: bool,
}

impl CacheHit {
    pub fn fresh(data: ServerMetadata) -> Self {
        Self {
            data,
            is_fresh: true,
        }
    }
}

/// Persistent snapshot store.
///
/// All operations are synchronous and small; async callers invoke them
/// directly.
pub trait MetadataCache: Send + Sync {
    /// `Ok(None)` on a miss, including a self-healed corrupt entry.
    fn load(&self, key: &CacheKey) -> Result<Option<CacheHit>, CacheError>;

    /// Atomically replace the entry for `key`.
    fn save(&self, key: &CacheKey, data: &ServerMetadata) -> Result<(), CacheError>;

    /// Remove the entry for `key`. A missing entry is not an error.
    fn delete(&self, key: &CacheKey) -> Result<(), CacheError>;
}

/// A cache that stores nothing, used when caching is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMetadataCache;

impl MetadataCache for NoMetadataCache {
    fn load(&self, _key: &CacheKey) -> Result<Option<CacheHit>, CacheError> {
        Ok(None)
    }

    fn save(&self, _key: &CacheKey, _data: &ServerMetadata) -> Result<(), CacheError> {
        Ok(())
    }

    fn delete(&self, _key: &CacheKey) -> Result<(), CacheError> {
        Ok(())
    }
}

/// Summary of one cache file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheFileInfo {
    pub name: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
    pub tools_count: usize,
    pub resources_count: usize,
    pub prompts_count: usize,
}

/// Summary of the whole cache directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheInfo {
    pub cache_dir: PathBuf,
    pub total_files: usize,
    pub total_size: u64,
    /// Sorted by file name.
    pub files: Vec<CacheFileInfo>,
}

/// Whole-directory operations, independent of any one connection.
pub trait CacheMaintenance: Send + Sync {
    /// Remove every cache entry. Returns the number of files removed.
    fn clear_all(&self) -> Result<usize, CacheError>;

    fn info(&self) -> Result<CacheInfo, CacheError>;
}
