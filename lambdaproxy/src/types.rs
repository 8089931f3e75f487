//! Caller-facing HTTP request and response types.
//!
//! These are the generic messages a caller builds and receives. They know
//! nothing about the gateway envelope; [`crate::codec`] maps them onto it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::headers::Headers;

/// A generic HTTP request.
///
/// `resource` may include a query string (`/books?isbn=1`). The body is
/// always raw text, never base64.
///
/// `username` and `password` are carried for the caller's benefit only; no
/// envelope field is derived from them.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequest {
    /// HTTP method (e.g., `"GET"`).
    pub method: String,

    /// Resource path, optionally followed by `?query`.
    pub resource: String,

    /// Ordered header pairs.
    #[serde(default)]
    pub headers: Headers,

    /// Raw request body.
    #[serde(default)]
    pub body: String,

    /// Optional basic-auth style username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Optional password paired with `username`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl HttpRequest {
    /// Creates a request with no headers and an empty body.
    #[must_use]
    pub fn new(method: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            resource: resource.into(),
            ..Self::default()
        }
    }

    /// Appends a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Splits `resource` into its path and the raw query string, if any.
    #[must_use]
    pub fn path_and_query(&self) -> (&str, Option<&str>) {
        match self.resource.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (self.resource.as_str(), None),
        }
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("resource", &self.resource)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// A generic HTTP response with a plain-text body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    /// HTTP status code.
    pub status_code: u16,

    /// Ordered header pairs.
    #[serde(default)]
    pub headers: Headers,

    /// Decoded response body.
    #[serde(default)]
    pub body: String,
}

impl HttpResponse {
    /// Creates a response with the given status, no headers and an empty body.
    #[must_use]
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            ..Self::default()
        }
    }

    /// Appends a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}
