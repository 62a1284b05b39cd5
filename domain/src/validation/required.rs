//! Required-parameter completeness check.

use crate::core::error::ParamError;
use crate::schema::ToolSchema;
use serde_json::{Map, Value};

/// Verify every name in `schema.required` is present in `params`.
///
/// All missing names are reported together, in declaration order.
pub fn validate_required(params: &Map<String, Value>, schema: &ToolSchema) -> Result<(), ParamError> {
    let missing: Vec<String> = schema
        .required
        .iter()
        .filter(|name| !params.contains_key(name.as_str()))
        .cloned()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ParamError::RequiredMissing(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ParamType, ParameterSchema};
    use serde_json::json;

    fn schema_requiring(names: &[&str]) -> ToolSchema {
        names.iter().fold(ToolSchema::new(), |schema, name| {
            schema.with_parameter(ParameterSchema::new(*name, ParamType::String).required(true))
        })
    }

    fn params(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_all_present() {
        let schema = schema_requiring(&["a", "b"]);
        let supplied = params(&[("a", json!(1)), ("b", json!("x"))]);
        assert!(validate_required(&supplied, &schema).is_ok());
    }

    #[test]
    fn test_one_missing() {
        let schema = schema_requiring(&["a", "b"]);
        let supplied = params(&[("a", json!(1))]);
        let err = validate_required(&supplied, &schema).unwrap_err();
        assert_eq!(err, ParamError::RequiredMissing(vec!["b".to_string()]));
    }

    #[test]
    fn test_all_missing_reported_together() {
        let schema = schema_requiring(&["a", "b"]);
        let err = validate_required(&Map::new(), &schema).unwrap_err();
        assert_eq!(err.missing(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_null_value_counts_as_present() {
        let schema = schema_requiring(&["a"]);
        let supplied = params(&[("a", Value::Null)]);
        assert!(validate_required(&supplied, &schema).is_ok());
    }

    #[test]
    fn test_required_name_without_declared_parameter() {
        // A required name the schema never declares still has to be supplied.
        let schema = ToolSchema {
            required: vec!["ghost".to_string()],
            ..ToolSchema::default()
        };
        let err = validate_required(&Map::new(), &schema).unwrap_err();
        assert_eq!(err.missing(), ["ghost".to_string()]);
    }
}
