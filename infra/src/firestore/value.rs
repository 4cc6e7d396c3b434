//! Conversion between JSON values and Firestore typed values
//!
//! Firestore documents carry each field as a single-key object naming its
//! type, e.g. `{"stringValue": "abc"}` or `{"integerValue": "42"}`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::InfrastructureError;

/// Encode a JSON value as a Firestore value
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                json!({ "integerValue": i.to_string() })
            } else if let Some(u) = n.as_u64() {
                json!({ "integerValue": u.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

/// Encode every entry of a JSON object
pub fn encode_fields(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect()
}

/// Decode a Firestore value back into plain JSON
pub fn decode_value(value: &Value) -> Result<Value, InfrastructureError> {
    let object = value
        .as_object()
        .ok_or_else(|| InfrastructureError::Codec(format!("expected typed value, got {}", value)))?;

    let (kind, inner) = match object.iter().next() {
        Some(entry) if object.len() == 1 => entry,
        _ => {
            return Err(InfrastructureError::Codec(format!(
                "typed value must have exactly one key, got {}",
                value
            )))
        }
    };

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| codec_error(kind, inner)),
        "integerValue" => decode_integer(inner).ok_or_else(|| codec_error(kind, inner)),
        "doubleValue" => match inner {
            Value::Number(_) => Ok(inner.clone()),
            _ => Err(codec_error(kind, inner)),
        },
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => match inner {
            Value::String(_) => Ok(inner.clone()),
            _ => Err(codec_error(kind, inner)),
        },
        "geoPointValue" => Ok(inner.clone()),
        "arrayValue" => {
            // An empty array is sent without `values`.
            let values = match inner.get("values") {
                Some(Value::Array(values)) => values.iter().map(decode_value).collect::<Result<Vec<_>, _>>()?,
                None => Vec::new(),
                Some(other) => return Err(codec_error(kind, other)),
            };
            Ok(Value::Array(values))
        }
        "mapValue" => match inner.get("fields") {
            Some(Value::Object(fields)) => Ok(Value::Object(decode_fields(fields)?)),
            None => Ok(Value::Object(Map::new())),
            Some(other) => Err(codec_error(kind, other)),
        },
        other => Err(InfrastructureError::Codec(format!("unsupported value type {}", other))),
    }
}

/// Decode every entry of a document's `fields`
pub fn decode_fields(fields: &Map<String, Value>) -> Result<Map<String, Value>, InfrastructureError> {
    fields
        .iter()
        .map(|(key, value)| decode_value(value).map(|decoded| (key.clone(), decoded)))
        .collect()
}

/// Build a document body (`{"fields": ...}`) from a serializable record
pub fn to_document<T: Serialize>(record: &T) -> Result<Value, InfrastructureError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => Ok(json!({ "fields": encode_fields(&map) })),
        Ok(other) => Err(InfrastructureError::Codec(format!(
            "documents must be objects, got {}",
            other
        ))),
        Err(e) => Err(InfrastructureError::Codec(e.to_string())),
    }
}

/// Read a record out of a Firestore document
///
/// A document without `fields` decodes from an empty object.
pub fn from_document<T: DeserializeOwned>(document: &Value) -> Result<T, InfrastructureError> {
    let fields = match document.get("fields") {
        Some(Value::Object(fields)) => decode_fields(fields)?,
        None => Map::new(),
        Some(other) => return Err(codec_error("fields", other)),
    };

    serde_json::from_value(Value::Object(fields)).map_err(|e| InfrastructureError::Codec(e.to_string()))
}

fn decode_integer(inner: &Value) -> Option<Value> {
    match inner {
        Value::String(s) => s
            .parse::<i64>()
            .ok()
            .map(Value::from)
            .or_else(|| s.parse::<u64>().ok().map(Value::from)),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(inner.clone()),
        _ => None,
    }
}

fn codec_error(kind: &str, inner: &Value) -> InfrastructureError {
    InfrastructureError::Codec(format!("invalid {}: {}", kind, inner))
}
