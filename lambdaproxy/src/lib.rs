#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Codec between generic HTTP messages and API gateway proxy envelopes.
//!
//! A managed API gateway forwards HTTP calls to a backend function as a fixed
//! JSON envelope and expects a JSON envelope back. This crate maps a plain
//! HTTP request/response model onto those envelopes, reconciling ordered
//! header pairs with the gateway's header mappings and handling bodies that
//! arrive base64-encoded.
//!
//! # Example
//!
//! ```rust
//! use lambdaproxy::{DecodeOptions, EncodeOptions, HttpRequest, decode_response, encode_request};
//!
//! let request = HttpRequest::new("POST", "/books/0-123456789")
//!     .with_header("Content-Type", "application/json")
//!     .with_body(r#"{"title":"x"}"#);
//! let bytes = encode_request(&request, &EncodeOptions::default())?;
//! assert!(bytes.ends_with(b"\n"));
//!
//! let reply = br#"{"statusCode":200,"headers":{},"body":"b2s=","isBase64Encoded":true}"#;
//! let response = decode_response(reply, &DecodeOptions::default())?;
//! assert_eq!(response.body, "ok");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! - [`codec`] - Envelope encoding and decoding in both directions
//! - [`error`] - Encoding, decoding and conversion errors
//! - [`headers`] - Conversion between header pairs and gateway mappings
//! - [`proto`] - Wire format types
//! - [`status`] - Ready-made error responses and diagnostic sinks
//! - [`types`] - Caller-facing request and response types
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing events and [`status::TracingSink`]

pub mod codec;
pub mod error;
pub mod headers;
mod interop;
pub mod proto;
pub mod status;
pub mod types;

pub use codec::{
    DecodeOptions, EncodeOptions, decode_request, decode_response, encode_request, encode_response,
};
pub use error::{ConversionError, DecodeError, EncodeError};
pub use headers::{EnvelopeMap, Headers};
pub use proto::{ProxyRequest, ProxyResponse};
pub use status::{DiagnosticSink, StderrSink, client_error, server_error};
pub use types::{HttpRequest, HttpResponse};
