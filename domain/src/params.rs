//! `name=value` argument parsing against a tool schema.

use crate::convert::ValueConverter;
use crate::core::error::ParamError;
use crate::schema::ToolSchema;
use crate::validation::validate_required;
use serde_json::{Map, Value};
use tracing::warn;

/// Typed parameters ready to hand to the remote tool call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedParams {
    pub values: Map<String, Value>,
    /// Non-fatal notices, e.g. parameters the schema does not declare.
    pub warnings: Vec<String>,
}

impl ParsedParams {
    pub fn into_values(self) -> Map<String, Value> {
        self.values
    }
}

/// Split, convert and validate raw `name=value` arguments.
///
/// Each argument is split on its first `=`, name and value are trimmed, and
/// the value is converted with the declared parameter schema. Undeclared
/// names pass through as strings with a warning. A later duplicate overwrites
/// an earlier one. The required check runs last, over the full map.
pub fn parse_params(args: &[String], schema: &ToolSchema) -> Result<ParsedParams, ParamError> {
    let mut parsed = ParsedParams::default();

    for arg in args {
        let (name, raw) = arg
            .split_once('=')
            .ok_or_else(|| ParamError::MalformedArgument(arg.clone()))?;
        let name = name.trim();
        let raw = raw.trim();

        if name.is_empty() {
            return Err(ParamError::EmptyName(arg.clone()));
        }

        let value = match schema.get(name) {
            Some(param) => ValueConverter::convert(raw, param)?,
            None => {
                let warning = format!("unknown parameter '{name}' (not in tool schema)");
                warn!("{}", warning);
                parsed.warnings.push(warning);
                Value::String(raw.to_string())
            }
        };

        parsed.values.insert(name.to_string(), value);
    }

    validate_required(&parsed.values, schema)?;
    Ok(parsed)
}
