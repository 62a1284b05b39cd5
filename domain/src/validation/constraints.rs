//! Inline value constraints: `enum` membership and string `format`.

use serde_json::Value;

/// String formats with a (deliberately shallow) syntactic check.
///
/// Formats we do not recognize always pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat<'a> {
    Email,
    Url,
    DateTime,
    Other(&'a str),
}

impl<'a> StringFormat<'a> {
    pub fn parse(name: &'a str) -> Self {
        match name {
            "email" => StringFormat::Email,
            "url" | "uri" => StringFormat::Url,
            "date-time" => StringFormat::DateTime,
            other => StringFormat::Other(other),
        }
    }

    pub fn accepts(&self, value: &str) -> bool {
        match self {
            StringFormat::Email => value.contains('@'),
            StringFormat::Url => value.starts_with("http://") || value.starts_with("https://"),
            StringFormat::DateTime => value.contains('T') && value.contains('-'),
            StringFormat::Other(_) => true,
        }
    }

    pub fn hint(&self) -> String {
        match self {
            StringFormat::Email => "Use email format: user@example.com".to_string(),
            StringFormat::Url => "Use URL format: https://example.com".to_string(),
            StringFormat::DateTime => "Use ISO 8601 format: 2024-01-01T12:00:00Z".to_string(),
            StringFormat::Other(name) => format!("Must match format: {name}"),
        }
    }
}

/// Whether `value` is one of the `allowed` enum members.
///
/// Numbers compare by numeric value, so an integer `42` matches an enum
/// entry written as `42.0`.
pub fn enum_contains(allowed: &[Value], value: &Value) -> bool {
    allowed.iter().any(|candidate| values_match(candidate, value))
}

/// Human-readable rendering of an enum, e.g. `[fast, slow]`.
pub fn describe_enum(allowed: &[Value]) -> String {
    let members: Vec<String> = allowed
        .iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect();
    format!("[{}]", members.join(", "))
}

fn values_match(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_f64() == y.as_f64(),
        },
        _ => a == b,
    }
}
