//! Domain layer for mcpmap
//!
//! This crate contains the parameter conversion engine and the metadata
//! records shared by every other layer. It performs no I/O and has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Parameter conversion
//!
//! A tool advertises its inputs as a JSON-Schema-like object. That raw
//! schema is normalized once by [`SchemaExtractor`] into a [`ToolSchema`];
//! each `name=value` argument is then converted by [`ValueConverter`] and
//! the full set checked by [`validate_required`]. [`parse_params`] runs the
//! whole pipeline.
//!
//! ## Metadata snapshots
//!
//! [`ServerMetadata`] holds the tools, resources and prompts a server
//! advertises. Snapshots are cached per connection under a [`CacheKey`].

pub mod config;
pub mod connection;
pub mod convert;
pub mod core;
pub mod metadata;
pub mod params;
pub mod schema;
pub mod validation;

// Re-export commonly used types
pub use config::OutputFormat;
pub use connection::{ConnectionConfig, DEFAULT_CLIENT_NAME, TransportKind, UnknownTransport};
pub use convert::{ConversionError, ValueConverter};
pub use core::error::{ParamError, SchemaError};
pub use metadata::{
    CacheKey, MetadataKind, PromptArgument, PromptRecord, ResourceRecord, ServerMetadata,
    ToolRecord, UnknownMetadataKind,
};
pub use params::{ParsedParams, parse_params};
pub use schema::{JsonSchema, ParamType, ParameterSchema, RawSchema, SchemaExtractor, ToolSchema};
pub use validation::{StringFormat, validate_required};
