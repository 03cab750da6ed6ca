//! Query serializer.
//!
//! # Design
//! A query input is any `Serialize` value that renders to a JSON object.
//! Each field becomes `key=value` in `application/x-www-form-urlencoded`
//! form, in field declaration order:
//! - strings as-is, numbers in decimal, booleans as `true`/`false`;
//! - `null` fields are omitted;
//! - arrays repeat the key once per element (null elements skipped);
//! - nested objects, and objects or arrays inside arrays, are JSON-encoded
//!   into a single value.

use serde::Serialize;
use serde_json::Value;

use crate::error::FetchError;

/// Serialize `query` into a query string without the leading `?`.
pub fn build_query<Q: Serialize + ?Sized>(query: &Q) -> Result<String, FetchError> {
    let pairs = query_pairs(query)?;
    serde_urlencoded::to_string(&pairs).map_err(|e| FetchError::Serialization(e.to_string()))
}

/// Append the serialized `query` to `path`, adding `?` only when non-empty.
pub fn append_query<Q: Serialize + ?Sized>(path: String, query: &Q) -> Result<String, FetchError> {
    let query = build_query(query)?;
    if query.is_empty() {
        return Ok(path);
    }
    Ok(format!("{path}?{query}"))
}

/// Flatten `query` into ordered key/value pairs.
pub fn query_pairs<Q: Serialize + ?Sized>(query: &Q) -> Result<Vec<(String, String)>, FetchError> {
    let record = match serde_json::to_value(query)? {
        Value::Object(record) => record,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(FetchError::Serialization(format!(
                "query must serialize to an object, got {}",
                kind(&other)
            )))
        }
    };

    let mut pairs = Vec::with_capacity(record.len());
    for (key, value) in record {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar_text(&item)? {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar_text(&other)? {
                    pairs.push((key, text));
                }
            }
        }
    }
    Ok(pairs)
}

fn scalar_text(value: &Value) -> Result<Option<String>, FetchError> {
    Ok(match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(serde_json::to_string(value)?),
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
