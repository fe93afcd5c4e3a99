//! Response envelope handling.
//!
//! The backend is inconsistent about wrapping: some endpoints return the
//! payload bare, some wrap it as `{data: …}`, and a few (proxied ones)
//! double-wrap as `{data: {data: …}}`. [`unwrap_data`] peels whichever
//! layering it finds and then runs the typed decode, so callers never see
//! the wrapping at all.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DecodeError;

/// The envelope shape the backend uses when it does wrap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: Some("success".to_string()),
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status: Some("error".to_string()),
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.data.is_some()
    }
}

/// Peel up to two `data` wrappers off `value`, then decode the remainder
/// as `T`.
///
/// A wrapper layer is only peeled when its `data` field is present and
/// non-null; a payload that happens to be shaped like an envelope with a
/// null `data` is decoded as-is and fails with a typed error instead of
/// silently producing nothing.
pub fn unwrap_data<T: DeserializeOwned>(value: Value) -> Result<T, DecodeError> {
    let payload = peel(value);
    serde_json::from_value(payload).map_err(DecodeError::from)
}

fn peel(value: Value) -> Value {
    let mut current = value;
    for _ in 0..2 {
        let inner = match &current {
            Value::Object(map) => match map.get("data") {
                Some(data) if !data.is_null() => data.clone(),
                _ => break,
            },
            _ => break,
        };
        current = inner;
    }
    current
}

/// Pull a human-readable failure message out of an error body.
///
/// Checks `message`, then a string `error`, then `error.message`, then
/// recurses one level into a `data` wrapper. Returns `None` when the body
/// carries nothing usable so the caller can fall back to the HTTP status.
pub fn extract_error_message(value: &Value) -> Option<String> {
    let map = value.as_object()?;

    if let Some(message) = map.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }
    match map.get("error") {
        Some(Value::String(s)) => return Some(s.clone()),
        Some(Value::Object(inner)) => {
            if let Some(message) = inner.get("message").and_then(Value::as_str) {
                return Some(message.to_string());
            }
        }
        _ => {}
    }
    map.get("data").and_then(extract_error_message)
}
