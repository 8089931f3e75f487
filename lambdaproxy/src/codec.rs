//! Encoding and decoding between generic HTTP messages and proxy envelopes.
//!
//! Caller side:
//!
//! - [`encode_request`]: [`HttpRequest`] → request envelope bytes
//! - [`decode_response`]: response envelope bytes → [`HttpResponse`]
//!
//! Backend side:
//!
//! - [`decode_request`]: request envelope bytes → [`HttpRequest`]
//! - [`encode_response`]: [`ProxyResponse`] → response envelope bytes
//!
//! Encoded envelopes are compact JSON followed by a single `\n`. No HTML
//! escaping is applied, so `&`, `<` and `>` appear literally.

use base64::prelude::*;
use serde::Serialize;
use url::form_urlencoded;

use crate::error::{DecodeError, EncodeError};
use crate::headers::{EnvelopeMap, Headers};
use crate::proto::{ProxyRequest, ProxyResponse};
use crate::types::{HttpRequest, HttpResponse};

/// Options for the encoding functions.
///
/// No options are recognized yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct EncodeOptions {}

impl EncodeOptions {
    /// Returns the default options.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

/// Options for the decoding functions.
///
/// No options are recognized yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct DecodeOptions {}

impl DecodeOptions {
    /// Returns the default options.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

/// Encodes a generic request as a gateway request envelope.
///
/// # Errors
///
/// Returns [`EncodeError::Json`] if serialization fails.
pub fn encode_request(
    request: &HttpRequest,
    _options: &EncodeOptions,
) -> Result<Vec<u8>, EncodeError> {
    let envelope = ProxyRequest::from(request);

    #[cfg(feature = "telemetry")]
    tracing::debug!(
        method = %envelope.http_method,
        resource = %envelope.resource,
        headers = envelope.headers.len(),
        body_len = envelope.body.len(),
        "Encoding proxy request"
    );

    to_json_line(&envelope)
}

/// Decodes a gateway response envelope into a generic response.
///
/// A body flagged `isBase64Encoded` is decoded from standard base64, so the
/// returned body is always plain text.
///
/// # Errors
///
/// Returns [`DecodeError::Json`] for malformed envelopes,
/// [`DecodeError::Base64`] for an invalid base64 body and
/// [`DecodeError::Utf8`] if the decoded body is not UTF-8.
pub fn decode_response(
    input: &[u8],
    _options: &DecodeOptions,
) -> Result<HttpResponse, DecodeError> {
    let result = serde_json::from_slice::<ProxyResponse>(input)
        .map_err(DecodeError::from)
        .and_then(HttpResponse::try_from);

    #[cfg(feature = "telemetry")]
    match &result {
        Ok(response) => tracing::debug!(
            status = response.status_code,
            headers = response.headers.len(),
            body_len = response.body.len(),
            "Decoded proxy response"
        ),
        Err(err) => tracing::warn!(error = %err, "Failed to decode proxy response"),
    }

    result
}

/// Decodes a gateway request envelope into a generic request.
///
/// The generic `resource` is the envelope `path` (falling back to
/// `resource` when `path` is empty) followed by the re-encoded query string.
/// Credentials are left unset.
///
/// # Errors
///
/// Same as [`decode_response`].
pub fn decode_request(input: &[u8], _options: &DecodeOptions) -> Result<HttpRequest, DecodeError> {
    let result = serde_json::from_slice::<ProxyRequest>(input)
        .map_err(DecodeError::from)
        .and_then(HttpRequest::try_from);

    #[cfg(feature = "telemetry")]
    if let Err(err) = &result {
        tracing::warn!(error = %err, "Failed to decode proxy request");
    }

    result
}

/// Encodes a response envelope, e.g. one built by [`crate::status`].
///
/// # Errors
///
/// Returns [`EncodeError::Json`] if serialization fails.
pub fn encode_response(
    response: &ProxyResponse,
    _options: &EncodeOptions,
) -> Result<Vec<u8>, EncodeError> {
    to_json_line(response)
}

fn to_json_line<T: Serialize>(value: &T) -> Result<Vec<u8>, EncodeError> {
    let mut out = serde_json::to_vec(value)?;
    out.push(b'\n');
    Ok(out)
}

/// Decodes `body` if it is flagged as base64.
///
/// Line breaks inside the base64 text are ignored, as MIME-style encoders
/// insert them.
fn decode_body(body: String, is_base64_encoded: bool) -> Result<String, DecodeError> {
    if !is_base64_encoded {
        return Ok(body);
    }
    let bytes = if body.contains(['\r', '\n']) {
        let compact: String = body.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
        BASE64_STANDARD.decode(compact)?
    } else {
        BASE64_STANDARD.decode(body)?
    };
    Ok(String::from_utf8(bytes)?)
}

impl From<&HttpRequest> for ProxyRequest {
    fn from(request: &HttpRequest) -> Self {
        let (path, query) = request.path_and_query();
        let headers = request.headers.to_envelope();
        let query = query
            .map(|q| EnvelopeMap::from_pairs(form_urlencoded::parse(q.as_bytes())))
            .unwrap_or_default();

        Self {
            resource: path.to_owned(),
            path: path.to_owned(),
            http_method: request.method.clone(),
            headers: headers.single,
            multi_value_headers: headers.multi,
            query_string_parameters: query.single,
            multi_value_query_string_parameters: query.multi,
            body: request.body.clone(),
            is_base64_encoded: false,
        }
    }
}

impl TryFrom<ProxyRequest> for HttpRequest {
    type Error = DecodeError;

    fn try_from(envelope: ProxyRequest) -> Result<Self, Self::Error> {
        let ProxyRequest {
            resource,
            path,
            http_method,
            headers,
            multi_value_headers,
            query_string_parameters,
            multi_value_query_string_parameters,
            body,
            is_base64_encoded,
        } = envelope;

        let body = decode_body(body, is_base64_encoded)?;
        let path = if path.is_empty() { resource } else { path };
        let query = EnvelopeMap {
            single: query_string_parameters,
            multi: multi_value_query_string_parameters,
        };
        let resource = if query.is_empty() {
            path
        } else {
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query.into_pairs())
                .finish();
            format!("{path}?{encoded}")
        };

        Ok(Self {
            method: http_method,
            resource,
            headers: Headers::from_envelope(EnvelopeMap {
                single: headers,
                multi: multi_value_headers,
            }),
            body,
            username: None,
            password: None,
        })
    }
}

impl TryFrom<ProxyResponse> for HttpResponse {
    type Error = DecodeError;

    fn try_from(envelope: ProxyResponse) -> Result<Self, Self::Error> {
        let ProxyResponse {
            status_code,
            headers,
            multi_value_headers,
            body,
            is_base64_encoded,
        } = envelope;

        Ok(Self {
            status_code,
            headers: Headers::from_envelope(EnvelopeMap {
                single: headers,
                multi: multi_value_headers,
            }),
            body: decode_body(body, is_base64_encoded)?,
        })
    }
}

impl From<HttpResponse> for ProxyResponse {
    fn from(response: HttpResponse) -> Self {
        let headers = response.headers.to_envelope();
        Self {
            status_code: response.status_code,
            headers: headers.single,
            multi_value_headers: headers.multi,
            body: response.body,
            is_base64_encoded: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn encode(request: &HttpRequest) -> Value {
        let bytes = encode_request(request, &EncodeOptions::default()).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn decode(envelope: &Value) -> Result<HttpResponse, DecodeError> {
        let bytes = serde_json::to_vec(envelope).unwrap();
        decode_response(&bytes, &DecodeOptions::default())
    }

    #[test]
    fn test_encode_resource_and_body_verbatim() {
        let request = HttpRequest::new("POST", "/books/0-123456789").with_body(r#"{"title":"x"}"#);
        let value = encode(&request);
        assert_eq!(value["resource"], "/books/0-123456789");
        assert_eq!(value["path"], "/books/0-123456789");
        assert_eq!(value["httpMethod"], "POST");
        assert_eq!(value["body"], r#"{"title":"x"}"#);
        assert!(value.get("isBase64Encoded").is_none());
    }

    #[test]
    fn test_encode_does_not_escape_html() {
        let request =
            HttpRequest::new("POST", "/books/0-123456789").with_body(r#"{"title":"a & b <c>"}"#);
        let bytes = encode_request(&request, &EncodeOptions::default()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("a & b <c>"));
        assert!(!text.contains("\\u0026"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_encode_headers_keep_name_value_pairing() {
        let request = HttpRequest::new("GET", "/books")
            .with_header("Accept", "application/json")
            .with_header("X-Trace", "a")
            .with_header("X-Trace", "b");
        let value = encode(&request);
        assert_eq!(
            value["headers"],
            json!({"Accept": "application/json", "X-Trace": "b"})
        );
        assert_eq!(value["multiValueHeaders"], json!({"X-Trace": ["a", "b"]}));
    }

    #[test]
    fn test_encode_splits_query_string() {
        let request = HttpRequest::new("GET", "/books?isbn=1&isbn=2&q=rust%20book");
        let value = encode(&request);
        assert_eq!(value["resource"], "/books");
        assert_eq!(value["path"], "/books");
        assert_eq!(
            value["queryStringParameters"],
            json!({"isbn": "2", "q": "rust book"})
        );
        assert_eq!(
            value["multiValueQueryStringParameters"],
            json!({"isbn": ["1", "2"]})
        );
    }

    #[test]
    fn test_encode_omits_credentials() {
        let request = HttpRequest::new("GET", "/").with_credentials("alice", "hunter2");
        let bytes = encode_request(&request, &EncodeOptions::default()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(!text.contains("alice"));
        assert!(!text.contains("hunter2"));
    }

    #[test]
    fn test_decode_plain_body_passes_through() {
        let body = "{\"ok\":true} & <b>bold</b> \u{e9}";
        let response = decode(&json!({
            "statusCode": 200,
            "headers": {"Content-Type": "application/json"},
            "body": body,
            "isBase64Encoded": false,
        }))
        .unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, body);
        assert_eq!(
            response.headers.get("Content-Type"),
            Some("application/json")
        );
    }

    #[test]
    fn test_decode_base64_body() {
        let encoded = BASE64_STANDARD.encode("hello world");
        let response = decode(&json!({
            "statusCode": 200,
            "body": encoded,
            "isBase64Encoded": true,
        }))
        .unwrap();
        assert_eq!(response.body, "hello world");
    }

    #[test]
    fn test_decode_base64_body_with_line_breaks() {
        let response = decode(&json!({
            "statusCode": 200,
            "body": "aGVsbG8g\r\nd29ybGQ=\n",
            "isBase64Encoded": true,
        }))
        .unwrap();
        assert_eq!(response.body, "hello world");
    }

    #[test]
    fn test_decode_invalid_base64_is_an_error() {
        let result = decode(&json!({
            "statusCode": 200,
            "body": "not base64!",
            "isBase64Encoded": true,
        }));
        assert!(matches!(result, Err(DecodeError::Base64(_))));
    }

    #[test]
    fn test_decode_non_utf8_body_is_an_error() {
        let result = decode(&json!({
            "statusCode": 200,
            "body": BASE64_STANDARD.encode([0xff_u8, 0xfe]),
            "isBase64Encoded": true,
        }));
        assert!(matches!(result, Err(DecodeError::Utf8(_))));
    }

    #[test]
    fn test_decode_invalid_json_is_an_error() {
        let result = decode_response(b"{not json", &DecodeOptions::default());
        assert!(matches!(result, Err(DecodeError::Json(_))));

        let result = decode_response(br#"{"statusCode":"ok"}"#, &DecodeOptions::default());
        assert!(matches!(result, Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_decode_multi_value_headers() {
        let response = decode(&json!({
            "statusCode": 302,
            "headers": {"Location": "/login", "Set-Cookie": "b=2"},
            "multiValueHeaders": {"Set-Cookie": ["a=1", "b=2"]},
            "body": "",
        }))
        .unwrap();
        assert_eq!(response.headers.len(), 3);
        assert_eq!(response.headers.get("Location"), Some("/login"));
        assert_eq!(
            response.headers.get_all("Set-Cookie").collect::<Vec<_>>(),
            ["a=1", "b=2"]
        );
    }

    #[test]
    fn test_decode_keeps_single_value_missing_from_multi() {
        let response = decode_response(
            br#"{"statusCode":200,"headers":{"A":"1"},"multiValueHeaders":{"A":["2"]},"body":""}"#,
            &DecodeOptions::default(),
        )
        .unwrap();
        let values: Vec<_> = response.headers.get_all("A").collect();
        assert_eq!(values, ["2", "1"]);
    }

    #[test]
    fn test_decode_status_outside_u16_is_an_error() {
        for status in ["70000", "-1"] {
            let input = format!(r#"{{"statusCode":{status},"body":""}}"#);
            let result = decode_response(input.as_bytes(), &DecodeOptions::default());
            assert!(matches!(result, Err(DecodeError::Json(_))));
        }
    }

    #[test]
    fn test_decode_request_envelope() {
        let bytes = serde_json::to_vec(&json!({
            "resource": "/books/{isbn}",
            "path": "/books/978-1234567890",
            "httpMethod": "GET",
            "headers": {"Accept": "*/*"},
            "queryStringParameters": {"format": "json"},
            "body": null,
        }))
        .unwrap();
        let request = decode_request(&bytes, &DecodeOptions::default()).unwrap();
        assert_eq!(request.method, "GET");
        assert_eq!(request.resource, "/books/978-1234567890?format=json");
        assert_eq!(request.headers.get("Accept"), Some("*/*"));
        assert!(request.body.is_empty());
        assert!(request.username.is_none());
    }

    #[test]
    fn test_request_survives_envelope() {
        let original = HttpRequest::new("PUT", "/books/1?tag=a&tag=b")
            .with_header("Content-Type", "text/plain")
            .with_body("chapter one");
        let bytes = encode_request(&original, &EncodeOptions::default()).unwrap();
        let back = decode_request(&bytes, &DecodeOptions::default()).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_encode_response_from_generic() {
        let response = HttpResponse::new(201)
            .with_header("Location", "/books/1")
            .with_body("created");
        let bytes = encode_response(&ProxyResponse::from(response), &EncodeOptions::new()).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            value,
            json!({
                "statusCode": 201,
                "headers": {"Location": "/books/1"},
                "body": "created",
                "isBase64Encoded": false,
            })
        );
    }
}
