//! Backend response envelopes
//!
//! Lists come back as `{"results": [...]}`; paged lists (sales) as
//! `{"results": {"content": [...]}}`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use weighbridge_types::ApiError;

#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrPage<T> {
    List(Vec<T>),
    Page { content: Option<Vec<T>> },
}

#[derive(Deserialize)]
struct Envelope<T> {
    results: Option<ListOrPage<T>>,
}

/// Decode a (possibly paged) list response
pub fn decode_list<T: DeserializeOwned>(resource: &str, body: &[u8]) -> Result<Vec<T>, ApiError> {
    let envelope: Envelope<T> =
        serde_json::from_slice(body).map_err(|e| ApiError::InvalidResponse {
            resource: resource.to_string(),
            message: e.to_string(),
        })?;
    Ok(match envelope.results {
        Some(ListOrPage::List(items)) => items,
        Some(ListOrPage::Page { content }) => content.unwrap_or_default(),
        None => Vec::new(),
    })
}

/// Parse a JSON body, tolerating an empty one
pub fn decode_value(resource: &str, body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidResponse {
        resource: resource.to_string(),
        message: e.to_string(),
    })
}

/// Find a string field at the top level or under `results` / `data`
pub fn find_string_field(value: &Value, keys: &[&str]) -> Option<String> {
    let scopes = [Some(value), value.get("results"), value.get("data")];
    scopes.into_iter().flatten().find_map(|scope| {
        keys.iter()
            .find_map(|key| scope.get(*key).and_then(Value::as_str))
            .map(str::to_string)
    })
}
