//! Server metadata snapshots and their cache fingerprint

pub mod cache_key;
pub mod entities;

pub use cache_key::CacheKey;
pub use entities::{
    MetadataKind, PromptArgument, PromptRecord, ResourceRecord, ServerMetadata, ToolRecord,
    UnknownMetadataKind,
};
