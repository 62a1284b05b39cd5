//! Structured conversion failures and their remediation hints.

use crate::schema::ParamType;
use thiserror::Error;

/// A raw argument string could not be coerced to its declared type.
///
/// Leaf variants carry the parameter name, the expected-type description,
/// the offending raw value and a fixed hint. Failures inside arrays and
/// objects are wrapped with the enclosing parameter's name and the element
/// index or property key.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("parameter {parameter:?} (type: {expected}): cannot convert {value:?}\nHint: {hint}")]
    Type {
        parameter: String,
        expected: String,
        value: String,
        hint: String,
    },

    #[error("parameter {parameter:?} (type: {expected}): {value:?} is not an allowed value\nHint: {hint}")]
    Enum {
        parameter: String,
        expected: String,
        value: String,
        hint: String,
    },

    #[error("parameter {parameter:?} (type: {expected}): invalid format {value:?}\nHint: {hint}")]
    Format {
        parameter: String,
        expected: String,
        value: String,
        hint: String,
    },

    #[error("{}array item {index}: {source}", enclosing(.parameter))]
    ArrayItem {
        /// Empty for an array nested directly in another array.
        parameter: String,
        index: usize,
        source: Box<ConversionError>,
    },

    #[error("{}object property {key:?}: {source}", enclosing(.parameter))]
    ObjectProperty {
        parameter: String,
        key: String,
        source: Box<ConversionError>,
    },
}

impl ConversionError {
    /// The innermost failing leaf.
    pub fn root(&self) -> &ConversionError {
        match self {
            ConversionError::ArrayItem { source, .. }
            | ConversionError::ObjectProperty { source, .. } => source.root(),
            leaf => leaf,
        }
    }

    /// Remediation hint of the innermost failure.
    pub fn hint(&self) -> &str {
        match self.root() {
            ConversionError::Type { hint, .. }
            | ConversionError::Enum { hint, .. }
            | ConversionError::Format { hint, .. } => hint,
            ConversionError::ArrayItem { .. } | ConversionError::ObjectProperty { .. } => "",
        }
    }

    /// Raw value that failed, from the innermost failure.
    pub fn value(&self) -> &str {
        match self.root() {
            ConversionError::Type { value, .. }
            | ConversionError::Enum { value, .. }
            | ConversionError::Format { value, .. } => value,
            ConversionError::ArrayItem { .. } | ConversionError::ObjectProperty { .. } => "",
        }
    }

    pub(crate) fn in_array(self, parameter: &str, index: usize) -> Self {
        ConversionError::ArrayItem {
            parameter: parameter.to_string(),
            index,
            source: Box::new(self),
        }
    }

    pub(crate) fn in_object(self, parameter: &str, key: &str) -> Self {
        ConversionError::ObjectProperty {
            parameter: parameter.to_string(),
            key: key.to_string(),
            source: Box::new(self),
        }
    }
}

fn enclosing(parameter: &str) -> String {
    if parameter.is_empty() {
        String::new()
    } else {
        format!("parameter {parameter:?}, ")
    }
}

/// Fixed remediation hint for a type mismatch.
pub fn type_hint(param_type: &ParamType) -> &'static str {
    match param_type {
        ParamType::Integer => "Use whole numbers like 42 or -10",
        ParamType::Number => "Use numbers like 3.14, -0.5, or 42",
        ParamType::Boolean => "Use true/false, yes/no, 1/0, or on/off",
        ParamType::Array => "Use JSON format [1,2,3] or comma-separated: a,b,c",
        ParamType::Object => "Use JSON format: {\"key\":\"value\"}",
        ParamType::Null => "Use empty string or 'null'",
        ParamType::String | ParamType::Other(_) => "Use any text value",
    }
}
