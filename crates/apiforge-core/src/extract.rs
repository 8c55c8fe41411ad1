//! Extraction of endpoint metadata from exported JSON.
//!
//! The extractor is a pure function of the input text. Every nested field it
//! reads may be absent or of the wrong type; in that case the field's empty
//! default is used. Only empty or syntactically invalid input is an error.
//!
//! # Examples
//!
//! ```
//! use apiforge_core::extract::extract;
//!
//! let data = extract(r#"{"method":"GET","url":"https://host/v1/api/users?x=1"}"#).unwrap();
//! assert_eq!(data.url, "/api/users");
//! assert!(data.request_params.is_empty());
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::model::{Parameter, ParsedData, ResponseExample};
use crate::{Error, Result};

/// Parse `text` and derive a [`ParsedData`] record from it.
pub fn extract(text: &str) -> Result<ParsedData> {
    if text.trim().is_empty() {
        return Err(Error::EmptyInput);
    }
    let json: JsonValue = serde_json::from_str(text).map_err(Error::Parse)?;

    let method = text_at(&json, "/method");
    let request_params = if method.to_uppercase() == "GET" {
        list_at::<Parameter>(&json, "/request/query/parameter")
    } else {
        list_at::<Parameter>(&json, "/request/body/raw_parameter")
    };

    let data = ParsedData {
        name: text_at(&json, "/name"),
        url: sanitize_url(&text_at(&json, "/url")),
        request_params,
        request_raw: text_at(&json, "/request/body/raw"),
        responses: list_at::<ResponseExample>(&json, "/response/example"),
        method,
    };

    log::debug!(
        "extracted {} {} with {} request params and {} responses",
        data.method,
        data.url,
        data.request_params.len(),
        data.responses.len()
    );
    Ok(data)
}

/// Reduce a full URL to the API path.
///
/// Keeps everything from the first `/api` onward, or prefixes a bare `api...`
/// with `/`, and then drops the query string.
pub fn sanitize_url(url: &str) -> String {
    let path = if let Some(idx) = url.find("/api") {
        url[idx..].to_string()
    } else if url.starts_with("api") {
        format!("/{url}")
    } else {
        url.to_string()
    };

    match path.find('?') {
        Some(idx) => path[..idx].to_string(),
        None => path,
    }
}

/// String at `pointer`; absent and non-string values give an empty string.
fn text_at(json: &JsonValue, pointer: &str) -> String {
    json.pointer(pointer)
        .and_then(JsonValue::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

fn list_at<T: DeserializeOwned>(json: &JsonValue, pointer: &str) -> Vec<T> {
    let Some(items) = json.pointer(pointer).and_then(JsonValue::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| {
            if !item.is_object() {
                log::warn!("skipping non-object entry {idx} at {pointer}");
                return None;
            }
            serde_json::from_value(item.clone())
                .map_err(|e| log::warn!("skipping malformed entry {idx} at {pointer}: {e}"))
                .ok()
        })
        .collect()
}
