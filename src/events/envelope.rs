//! Outer `{region, detail}` shape of a placement notification.

use serde_json::{Map, Value};

use super::errors::{NormalizationError, NormalizationResult};

/// Decoded notification envelope.
///
/// `detail` is kept as a raw JSON object; field extraction happens in the
/// normalizer so unknown fields never cause a rejection.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationEnvelope {
    pub region: Option<String>,
    pub detail: Option<Map<String, Value>>,
}

impl NotificationEnvelope {
    pub fn parse(raw: &str) -> NormalizationResult<Self> {
        let value: Value = serde_json::from_str(raw)?;
        let Value::Object(mut envelope) = value else {
            return Err(NormalizationError::malformed(
                "notification envelope must be a JSON object",
            ));
        };

        let region = string_field(&envelope, "region")?;
        let detail = match envelope.remove("detail") {
            None | Some(Value::Null) => None,
            Some(Value::Object(detail)) => Some(detail),
            Some(_) => {
                return Err(NormalizationError::malformed(
                    "detail must be a JSON object",
                ))
            }
        };

        Ok(Self { region, detail })
    }
}

/// Read a string field, treating absent, null and empty values as unset.
pub(crate) fn string_field(
    object: &Map<String, Value>,
    key: &str,
) -> NormalizationResult<Option<String>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(NormalizationError::malformed(format!(
            "{key} must be a string, got {}",
            json_kind(other)
        ))),
    }
}

/// Like [`string_field`] but also accepts numbers, rendered in decimal.
pub(crate) fn scalar_field(
    object: &Map<String, Value>,
    key: &str,
) -> NormalizationResult<Option<String>> {
    match object.get(key) {
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        _ => string_field(object, key),
    }
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
