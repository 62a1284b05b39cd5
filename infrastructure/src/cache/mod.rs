//! File-backed metadata cache
//!
//! - [`FileMetadataCache`]: per-connection snapshot store
//! - [`CacheDirectory`]: `cache clear` / `cache info`

mod envelope;
mod file_cache;
mod maintenance;
mod paths;

pub use envelope::{CACHE_VERSION, CacheEnvelope, DecodeError};
pub use file_cache::FileMetadataCache;
pub use maintenance::CacheDirectory;
pub use paths::{default_cache_dir, resolve_cache_dir};
