//! Endpoint metadata extracted from an API-design export.
//!
//! Field names follow the exporter's snake_case JSON so that parameters can be
//! serialized back into prompts verbatim. Fields the exporter adds that are not
//! modelled here are preserved in `extra` and written back out unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::lenient;

/// One field of a request or response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Opaque identifier, unique within its owning list
    #[serde(default, deserialize_with = "lenient::text")]
    pub param_id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    /// Usually one of `string|number|boolean|array|object|null`; other values pass through
    #[serde(default, deserialize_with = "lenient::text")]
    pub field_type: String,
    /// Dotted path such as `body.data.accountId`
    #[serde(default, deserialize_with = "lenient::text")]
    pub key: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_checked: i64,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub not_null: i64,
    /// Example value rendered as text
    #[serde(default, deserialize_with = "lenient::text")]
    pub value: String,
    #[serde(flatten)]
    pub extra: JsonMap<String, JsonValue>,
}

impl Parameter {
    /// Nesting depth of the key: number of `.` separators.
    pub fn depth(&self) -> usize {
        self.key.matches('.').count()
    }

    /// Last segment of the dotted key.
    pub fn field_name(&self) -> &str {
        self.key.rsplit('.').next().unwrap_or_default()
    }
}

/// HTTP status code and label of a documented response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Expect {
    #[serde(default, deserialize_with = "lenient::text")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(flatten)]
    pub extra: JsonMap<String, JsonValue>,
}

/// One documented response variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseExample {
    #[serde(default, deserialize_with = "lenient::text")]
    pub example_id: String,
    /// Raw JSON text of the full example body
    #[serde(default, deserialize_with = "lenient::text")]
    pub raw: String,
    #[serde(default, deserialize_with = "lenient::list")]
    pub raw_parameter: Vec<Parameter>,
    #[serde(default, deserialize_with = "lenient::object_or_default")]
    pub expect: Expect,
    #[serde(flatten)]
    pub extra: JsonMap<String, JsonValue>,
}

impl ResponseExample {
    /// Whether the documented status code is a 2xx.
    pub fn is_success(&self) -> bool {
        self.expect.code.starts_with('2')
    }
}

/// Normalized metadata record produced by one successful extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedData {
    pub name: String,
    /// HTTP method with its original case
    pub method: String,
    /// Sanitized request path
    pub url: String,
    pub request_params: Vec<Parameter>,
    pub request_raw: String,
    pub responses: Vec<ResponseExample>,
}

impl ParsedData {
    /// Whether the request parameters are taken from the query string.
    pub fn is_get(&self) -> bool {
        self.method.eq_ignore_ascii_case("GET")
    }
}
