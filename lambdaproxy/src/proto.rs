//! Wire format types for the gateway proxy integration.
//!
//! Field names are fixed by the gateway contract and serialize in camelCase:
//!
//! - [`ProxyRequest`]: `resource`, `path`, `httpMethod`, `headers`,
//!   `queryStringParameters`, `body`, `isBase64Encoded`
//! - [`ProxyResponse`]: `statusCode`, `headers`, `body`, `isBase64Encoded`
//!
//! The multi-value companions (`multiValueHeaders`,
//! `multiValueQueryStringParameters`) are only written when a name repeats.
//! On input every map and the body tolerate being absent or `null`, which is
//! how the gateway sends a request without headers, query or body.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};

/// Multi-valued wire map (`name → [values]`).
pub type MultiValueMap = BTreeMap<String, Vec<String>>;

/// A request envelope as sent by the gateway to a backend function.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    /// Resource path as configured on the gateway.
    #[serde(default)]
    pub resource: String,

    /// URL path requested by the caller.
    #[serde(default)]
    pub path: String,

    /// HTTP method.
    #[serde(default)]
    pub http_method: String,

    /// One value per header name.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// All values for repeated header names.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub multi_value_headers: MultiValueMap,

    /// One value per query parameter name.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub query_string_parameters: BTreeMap<String, String>,

    /// All values for repeated query parameter names.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub multi_value_query_string_parameters: MultiValueMap,

    /// Request body, base64 when `is_base64_encoded` is set.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub body: String,

    /// Whether `body` is base64 text.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_base64_encoded: bool,
}

/// A response envelope as returned by a backend function to the gateway.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    /// HTTP status code.
    pub status_code: u16,

    /// One value per header name.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// All values for repeated header names.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub multi_value_headers: MultiValueMap,

    /// Response body, base64 when `is_base64_encoded` is set.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub body: String,

    /// Whether `body` is base64 text.
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl ProxyResponse {
    /// Creates a plain-text response with no headers.
    #[must_use]
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
            ..Self::default()
        }
    }
}
