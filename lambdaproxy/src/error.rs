//! Error types for envelope encoding and decoding.

/// Errors that can occur while encoding an outgoing envelope.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// JSON serialization failed.
    #[error("failed to encode proxy envelope: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur while decoding an incoming envelope.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The bytes are not JSON, or do not have the envelope shape.
    #[error("failed to decode proxy envelope: {0}")]
    Json(#[from] serde_json::Error),

    /// The body is flagged `isBase64Encoded` but is not valid base64.
    #[error("invalid base64 body: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The base64-decoded body is not valid UTF-8 text.
    #[error("decoded body is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Errors converting between this crate's messages and [`http`] types.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// A header value is not valid UTF-8.
    #[error("header {name} has a non UTF-8 value")]
    NonUtf8Header {
        /// The offending header name.
        name: String,
    },

    /// The status code is outside `100..=999`.
    #[error("invalid status code: {0}")]
    Status(#[from] http::status::InvalidStatusCode),

    /// A header name is not a valid HTTP token.
    #[error("invalid header name: {0}")]
    HeaderName(#[from] http::header::InvalidHeaderName),

    /// A header value contains forbidden bytes.
    #[error("invalid header value: {0}")]
    HeaderValue(#[from] http::header::InvalidHeaderValue),
}
