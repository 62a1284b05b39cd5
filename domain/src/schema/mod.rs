//! Tool parameter schemas
//!
//! ```text
//! raw schema ──▶ SchemaExtractor ──▶ ToolSchema
//!  (typed | decoded JSON)              └─ parameters: name → ParameterSchema
//!                                                      ├─ items      (arrays)
//!                                                      └─ properties (objects)
//! ```
//!
//! The tree is built fresh for every tool invocation and never mutated
//! afterwards.

pub mod entities;
pub mod extract;
pub mod json_schema;

pub use entities::{ParamType, ParameterSchema, ToolSchema};
pub use extract::{RawSchema, SchemaExtractor};
pub use json_schema::JsonSchema;
