//! Schema-driven string → JSON value conversion
//!
//! | type | accepted input |
//! |------|----------------|
//! | `string`  | anything; one layer of matching quotes is stripped, then `enum`/`format` checked |
//! | `integer` | whole numbers (`42`, `-10`); anything containing `.` is rejected |
//! | `number`  | any finite float (`3.14`, `-0.5`, `42`) |
//! | `boolean` | `true/yes/1/on`, `false/no/0/off` (case-insensitive) |
//! | `array`   | JSON (`[1,2,3]`) or comma-separated (`a,b,c`); `""` is empty |
//! | `object`  | JSON object text |
//! | `null`    | `""` or `null` |
//!
//! Array elements and object properties with a child schema are re-rendered
//! to strings and pushed back through [`ValueConverter::convert`].

use super::error::{ConversionError, type_hint};
use crate::schema::{ParamType, ParameterSchema};
use crate::validation::{StringFormat, describe_enum, enum_contains};
use serde_json::{Map, Number, Value};

const BOOLEAN_TRUE: [&str; 4] = ["true", "yes", "1", "on"];
const BOOLEAN_FALSE: [&str; 4] = ["false", "no", "0", "off"];

/// Converts raw argument strings to typed JSON values.
pub struct ValueConverter;

impl ValueConverter {
    /// Convert `raw` according to `schema`.
    ///
    /// An empty input with a declared default returns the default verbatim,
    /// without running the type converter or any constraint check.
    pub fn convert(raw: &str, schema: &ParameterSchema) -> Result<Value, ConversionError> {
        if raw.is_empty() {
            if let Some(default) = &schema.default {
                return Ok(default.clone());
            }
        }

        match &schema.param_type {
            ParamType::String => convert_string(raw, schema),
            ParamType::Integer => convert_integer(raw, schema),
            ParamType::Number => convert_number(raw, schema),
            ParamType::Boolean => convert_boolean(raw, schema),
            ParamType::Array => convert_array(raw, schema),
            ParamType::Object => convert_object(raw, schema),
            ParamType::Null => convert_null(raw, schema),
            ParamType::Other(_) => Ok(Value::String(raw.to_string())),
        }
    }
}

/// String form of a decoded JSON element, used when recursing into children.
///
/// Strings are rendered without quotes; everything else as compact JSON.
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn type_error(schema: &ParameterSchema, value: &str) -> ConversionError {
    ConversionError::Type {
        parameter: schema.name.clone(),
        expected: schema.param_type.to_string(),
        value: value.to_string(),
        hint: type_hint(&schema.param_type).to_string(),
    }
}

fn check_enum(
    schema: &ParameterSchema,
    converted: Value,
    raw: &str,
) -> Result<Value, ConversionError> {
    match schema.allowed_values() {
        Some(allowed) if !enum_contains(allowed, &converted) => {
            let members = describe_enum(allowed);
            Err(ConversionError::Enum {
                parameter: schema.name.clone(),
                expected: format!("{} enum {}", schema.param_type, members),
                value: raw.to_string(),
                hint: format!("Must be one of: {members}"),
            })
        }
        _ => Ok(converted),
    }
}

fn strip_quotes(value: &str) -> &str {
    if value.len() < 2 {
        return value;
    }
    ['"', '\'']
        .into_iter()
        .find_map(|quote| value.strip_prefix(quote)?.strip_suffix(quote))
        .unwrap_or(value)
}

fn convert_string(raw: &str, schema: &ParameterSchema) -> Result<Value, ConversionError> {
    let value = strip_quotes(raw);
    let converted = check_enum(schema, Value::String(value.to_string()), value)?;

    if let Some(format_name) = schema.format_name() {
        let format = StringFormat::parse(format_name);
        if !format.accepts(value) {
            return Err(ConversionError::Format {
                parameter: schema.name.clone(),
                expected: format!("string (format: {format_name})"),
                value: value.to_string(),
                hint: format.hint(),
            });
        }
    }

    Ok(converted)
}

fn convert_integer(raw: &str, schema: &ParameterSchema) -> Result<Value, ConversionError> {
    let value = raw.trim();
    if value.contains('.') {
        return Err(type_error(schema, value));
    }

    let parsed: i64 = value.parse().map_err(|_| type_error(schema, value))?;
    check_enum(schema, Value::from(parsed), value)
}

fn convert_number(raw: &str, schema: &ParameterSchema) -> Result<Value, ConversionError> {
    let value = raw.trim();
    let number = value
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| type_error(schema, value))?;

    check_enum(schema, Value::Number(number), value)
}

fn convert_boolean(raw: &str, schema: &ParameterSchema) -> Result<Value, ConversionError> {
    let value = raw.trim().to_lowercase();

    if BOOLEAN_TRUE.contains(&value.as_str()) {
        Ok(Value::Bool(true))
    } else if BOOLEAN_FALSE.contains(&value.as_str()) {
        Ok(Value::Bool(false))
    } else {
        Err(type_error(schema, &value))
    }
}

fn convert_array(raw: &str, schema: &ParameterSchema) -> Result<Value, ConversionError> {
    let value = raw.trim();

    if value.starts_with('[') && value.ends_with(']') {
        let elements: Vec<Value> =
            serde_json::from_str(value).map_err(|_| ConversionError::Type {
                parameter: schema.name.clone(),
                expected: "array".to_string(),
                value: value.to_string(),
                hint: format!("Invalid JSON array format. {}", type_hint(&ParamType::Array)),
            })?;

        return match &schema.items {
            Some(items) => elements
                .iter()
                .enumerate()
                .map(|(i, element)| {
                    ValueConverter::convert(&render(element), items)
                        .map_err(|e| e.in_array(&schema.name, i))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            None => Ok(Value::Array(elements)),
        };
    }

    if value.is_empty() {
        return Ok(Value::Array(Vec::new()));
    }

    value
        .split(',')
        .map(str::trim)
        .enumerate()
        .map(|(i, part)| match &schema.items {
            Some(items) => {
                ValueConverter::convert(part, items).map_err(|e| e.in_array(&schema.name, i))
            }
            None => Ok(Value::String(part.to_string())),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

fn convert_object(raw: &str, schema: &ParameterSchema) -> Result<Value, ConversionError> {
    let value = raw.trim();
    let object: Map<String, Value> =
        serde_json::from_str(value).map_err(|_| type_error(schema, value))?;

    let Some(properties) = &schema.properties else {
        return Ok(Value::Object(object));
    };

    let mut converted = Map::with_capacity(object.len());
    for (key, val) in object {
        let val = match properties.get(&key) {
            Some(property) => ValueConverter::convert(&render(&val), property)
                .map_err(|e| e.in_object(&schema.name, &key))?,
            None => val,
        };
        converted.insert(key, val);
    }

    Ok(Value::Object(converted))
}

fn convert_null(raw: &str, schema: &ParameterSchema) -> Result<Value, ConversionError> {
    let value = raw.trim();
    if value.is_empty() || value == "null" {
        Ok(Value::Null)
    } else {
        Err(type_error(schema, value))
    }
}
