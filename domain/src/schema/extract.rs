//! Schema intake boundary
//!
//! A tool's input schema reaches us either as a typed [`JsonSchema`] or as a
//! generic decoded JSON value straight off the wire. [`SchemaExtractor`]
//! normalizes both into one [`ToolSchema`] tree so nothing downstream needs
//! to know which encoding it came from.
//!
//! Schemas are assumed to be acyclic; recursion depth follows the input.

use super::entities::{ParamType, ParameterSchema, ToolSchema};
use super::json_schema::JsonSchema;
use crate::core::error::SchemaError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Raw tool input schema in one of the two accepted encodings.
#[derive(Debug, Clone, PartialEq)]
pub enum RawSchema {
    /// Already-typed schema object.
    Typed(JsonSchema),
    /// Generic decoded JSON, expected to be an object (or `null`).
    Decoded(Value),
}

impl From<JsonSchema> for RawSchema {
    fn from(schema: JsonSchema) -> Self {
        RawSchema::Typed(schema)
    }
}

impl From<Value> for RawSchema {
    fn from(value: Value) -> Self {
        RawSchema::Decoded(value)
    }
}

/// Normalizes raw schemas into the canonical [`ToolSchema`].
pub struct SchemaExtractor;

impl SchemaExtractor {
    /// Build a [`ToolSchema`] from an optional raw schema.
    ///
    /// An absent schema (or a decoded `null`) yields an empty schema. A decoded
    /// value that is not a JSON object is rejected.
    pub fn extract(raw: Option<&RawSchema>) -> Result<ToolSchema, SchemaError> {
        match raw {
            None | Some(RawSchema::Decoded(Value::Null)) => Ok(ToolSchema::default()),
            Some(RawSchema::Typed(schema)) => Ok(Self::from_typed(schema)),
            Some(RawSchema::Decoded(Value::Object(map))) => Ok(Self::from_decoded(map)),
            Some(RawSchema::Decoded(other)) => Err(SchemaError::NotAnObject(json_kind(other))),
        }
    }

    fn from_typed(schema: &JsonSchema) -> ToolSchema {
        let required = schema.required.clone();
        let parameters = schema
            .properties
            .iter()
            .map(|(name, prop)| (name.clone(), typed_parameter(name, prop, &required)))
            .collect();

        ToolSchema {
            parameters,
            required,
        }
    }

    fn from_decoded(map: &Map<String, Value>) -> ToolSchema {
        let required: Vec<String> = map
            .get("required")
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let parameters = map
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| {
                props
                    .iter()
                    .map(|(name, prop)| (name.clone(), decoded_parameter(name, prop, &required)))
                    .collect()
            })
            .unwrap_or_default();

        ToolSchema {
            parameters,
            required,
        }
    }
}

fn typed_parameter(name: &str, schema: &JsonSchema, required: &[String]) -> ParameterSchema {
    let param_type = schema
        .schema_type
        .as_deref()
        .map(ParamType::from)
        .unwrap_or(ParamType::String);

    let mut param = ParameterSchema::new(name, param_type);
    param.required = required.iter().any(|r| r == name);
    param.description = schema.description.clone();
    param.format = schema.format.clone();
    param.default = schema.default.clone().filter(|v| !v.is_null());
    param.enum_values = schema.enum_values.clone();

    match param.param_type {
        ParamType::Array => {
            param.items = schema
                .items
                .as_deref()
                .map(|items| Box::new(typed_parameter("", items, &[])));
        }
        ParamType::Object if !schema.properties.is_empty() => {
            param.properties = Some(
                schema
                    .properties
                    .iter()
                    .map(|(prop_name, prop)| (prop_name.clone(), typed_parameter(prop_name, prop, &[])))
                    .collect(),
            );
        }
        _ => {}
    }

    param
}

fn decoded_parameter(name: &str, schema: &Value, required: &[String]) -> ParameterSchema {
    let is_required = required.iter().any(|r| r == name);

    let Some(map) = schema.as_object() else {
        return ParameterSchema::new(name, ParamType::String).required(is_required);
    };

    let param_type = map
        .get("type")
        .and_then(Value::as_str)
        .map(ParamType::from)
        .unwrap_or(ParamType::String);

    let mut param = ParameterSchema::new(name, param_type).required(is_required);
    param.description = string_field(map, "description");
    param.format = string_field(map, "format");
    param.default = map.get("default").filter(|v| !v.is_null()).cloned();
    param.enum_values = map.get("enum").and_then(Value::as_array).cloned();

    match param.param_type {
        ParamType::Array => {
            param.items = map
                .get("items")
                .map(|items| Box::new(decoded_parameter("", items, &[])));
        }
        ParamType::Object => {
            // An empty map is treated as no property schemas at all.
            param.properties = map
                .get("properties")
                .and_then(Value::as_object)
                .filter(|props| !props.is_empty())
                .map(|props| {
                    props
                        .iter()
                        .map(|(prop_name, prop)| {
                            (prop_name.clone(), decoded_parameter(prop_name, prop, &[]))
                        })
                        .collect::<BTreeMap<_, _>>()
                });
        }
        _ => {}
    }

    param
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
