use serde::Serialize;
use serde_json::Value;

use crate::client::Params;
use crate::error::ApiError;

/// Longest body excerpt written to logs.
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Joins the API base and a caller-supplied path.
///
/// The path is used as given: it must already be escaped and start with `/`.
pub(crate) fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

pub(crate) fn append_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}{query}")
}

/// Form-style query encoding of a parameter map.
///
/// Arrays become `key[0]=a&key[1]=b`, nested objects `key[sub]=v`,
/// booleans `1`/`0`; `null` entries are dropped.
pub(crate) fn build_query(params: &Params) -> String {
    let mut pairs = Vec::new();
    for (key, value) in params {
        push_pairs(&mut pairs, key, value);
    }
    pairs.join("&")
}

fn push_pairs(out: &mut Vec<String>, key: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push(format!(
            "{}={}",
            urlencoding::encode(key),
            if *b { "1" } else { "0" }
        )),
        Value::Number(n) => out.push(format!("{}={}", urlencoding::encode(key), n)),
        Value::String(s) => out.push(format!(
            "{}={}",
            urlencoding::encode(key),
            urlencoding::encode(s)
        )),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                push_pairs(out, &format!("{key}[{i}]"), item);
            }
        }
        Value::Object(map) => {
            for (sub, item) in map {
                push_pairs(out, &format!("{key}[{sub}]"), item);
            }
        }
    }
}

/// Serializes typed parameters into the map the dispatcher takes.
pub(crate) fn to_params<T: Serialize + ?Sized>(value: &T) -> Result<Params, ApiError> {
    match serde_json::to_value(value).map_err(|e| ApiError::Encode(e.to_string()))? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Params::new()),
        other => Err(ApiError::Encode(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

/// A decoded body that carries nothing: `null`, `false`, `0`, `""`, `"0"`, `[]`, `{}`.
pub(crate) fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Compares a listing key field against an identifier; numeric ids compare by their text.
pub(crate) fn key_matches(field: &Value, identifier: &str) -> bool {
    match field {
        Value::String(s) => s == identifier,
        Value::Number(n) => n.to_string() == identifier,
        _ => false,
    }
}

pub(crate) fn truncate_for_log(body: &str) -> String {
    if body.chars().count() > MAX_LOG_BODY_LENGTH {
        let head: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{head}... [truncated, {} bytes total]", body.len())
    } else {
        body.to_string()
    }
}
