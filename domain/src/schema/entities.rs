//! Canonical parameter-schema tree
//!
//! Every downstream consumer (conversion, validation, completion) works on
//! these types only. Both raw schema encodings are normalized into them by
//! [`SchemaExtractor`](super::extract::SchemaExtractor).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Declared JSON type of a single parameter.
///
/// Unrecognized type names are preserved in [`ParamType::Other`] so they can
/// be reported, but conversion treats them as pass-through strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    Null,
    Other(String),
}

impl ParamType {
    pub fn as_str(&self) -> &str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Array => "array",
            ParamType::Object => "object",
            ParamType::Null => "null",
            ParamType::Other(name) => name,
        }
    }
}

impl Default for ParamType {
    fn default() -> Self {
        ParamType::String
    }
}

impl From<&str> for ParamType {
    fn from(s: &str) -> Self {
        match s {
            "string" => ParamType::String,
            "integer" => ParamType::Integer,
            "number" => ParamType::Number,
            "boolean" => ParamType::Boolean,
            "array" => ParamType::Array,
            "object" => ParamType::Object,
            "null" => ParamType::Null,
            other => ParamType::Other(other.to_string()),
        }
    }
}

impl From<String> for ParamType {
    fn from(s: String) -> Self {
        ParamType::from(s.as_str())
    }
}

impl From<ParamType> for String {
    fn from(t: ParamType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed description of a single named tool input.
///
/// A node exclusively owns its `items` / `properties` children.
/// `items` is only populated for arrays and `properties` only for objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ParameterSchema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, ParameterSchema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParameterSchema {
    pub fn new(name: impl Into<String>, param_type: impl Into<ParamType>) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            required: false,
            default: None,
            enum_values: None,
            format: None,
            items: None,
            properties: None,
            description: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_enum(mut self, values: Vec<Value>) -> Self {
        self.enum_values = Some(values);
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the element schema. Ignored unless this node is an array.
    pub fn with_items(mut self, items: ParameterSchema) -> Self {
        if self.param_type == ParamType::Array {
            self.items = Some(Box::new(items));
        }
        self
    }

    /// Add a child property schema. Ignored unless this node is an object.
    pub fn with_property(mut self, property: ParameterSchema) -> Self {
        if self.param_type == ParamType::Object {
            self.properties
                .get_or_insert_with(BTreeMap::new)
                .insert(property.name.clone(), property);
        }
        self
    }

    /// Non-empty enum constraint, if any.
    pub fn allowed_values(&self) -> Option<&[Value]> {
        self.enum_values.as_deref().filter(|values| !values.is_empty())
    }

    /// Non-empty format constraint, if any.
    pub fn format_name(&self) -> Option<&str> {
        self.format.as_deref().filter(|f| !f.is_empty())
    }
}

/// Declared parameter contract of one invokable tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub parameters: BTreeMap<String, ParameterSchema>,
    pub required: Vec<String>,
}

impl ToolSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parameter; its `required` flag also feeds the required list.
    pub fn with_parameter(mut self, parameter: ParameterSchema) -> Self {
        if parameter.required && !self.required.contains(&parameter.name) {
            self.required.push(parameter.name.clone());
        }
        self.parameters.insert(parameter.name.clone(), parameter);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParameterSchema> {
        self.parameters.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Parameter names in stable (sorted) order.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.keys().map(String::as_str)
    }
}
