//! Domain error types

use crate::convert::error::ConversionError;
use thiserror::Error;

/// Raised when a raw tool schema matches neither accepted encoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("schema is not a valid object (got {0})")]
    NotAnObject(&'static str),
}

/// Errors produced while turning raw `name=value` arguments into typed
/// tool parameters.
///
/// Any of these aborts the invocation before a remote call is attempted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("invalid parameter format '{0}', expected name=value")]
    MalformedArgument(String),

    #[error("parameter name cannot be empty in '{0}'")]
    EmptyName(String),

    #[error("missing required parameters: {}", .0.join(", "))]
    RequiredMissing(Vec<String>),
}

impl ParamError {
    /// Names reported as missing, empty for every other variant.
    pub fn missing(&self) -> &[String] {
        match self {
            ParamError::RequiredMissing(names) => names,
            _ => &[],
        }
    }
}
