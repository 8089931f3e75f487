//! Ready-made error responses for a hosting layer.
//!
//! [`server_error`] records the failure on a [`DiagnosticSink`] and answers
//! `500 Internal Server Error`; [`client_error`] answers any status with its
//! reason phrase. Neither validates the status range.

use std::fmt;
use std::io::Write;
use std::panic::Location;

use http::StatusCode;

use crate::proto::ProxyResponse;

/// A failure reported through a [`DiagnosticSink`].
#[derive(Debug, Clone, Copy)]
pub struct Diagnostic<'a> {
    /// Where [`server_error`] was called from.
    pub location: &'static Location<'static>,
    /// The rendered error.
    pub message: &'a str,
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.location.file(),
            self.location.line(),
            self.message
        )
    }
}

/// Write-only destination for diagnostics.
///
/// Sinks are shared by every caller of the hosting process, so they must be
/// safe to call concurrently. Nothing written is ever read back.
pub trait DiagnosticSink: Send + Sync {
    /// Records one diagnostic.
    fn record(&self, diagnostic: &Diagnostic<'_>);
}

/// Writes `ERROR <file>:<line>: <message>` lines to standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn record(&self, diagnostic: &Diagnostic<'_>) {
        let mut stderr = std::io::stderr().lock();
        // Nowhere left to report a failing stderr.
        let _ = writeln!(stderr, "ERROR {diagnostic}");
    }
}

/// Emits diagnostics as `tracing` error events.
#[cfg(feature = "telemetry")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[cfg(feature = "telemetry")]
impl DiagnosticSink for TracingSink {
    fn record(&self, diagnostic: &Diagnostic<'_>) {
        tracing::error!(
            location = %diagnostic.location,
            error = diagnostic.message,
            "Internal server error"
        );
    }
}

/// Returns the standard reason phrase for `status`.
///
/// Codes without a registered phrase (or outside `100..=999`) yield `""`.
#[must_use]
pub fn reason_phrase(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or_default()
}

/// Records `err` on `sink` and returns a `500 Internal Server Error` envelope.
///
/// The diagnostic location is the caller of this function.
#[track_caller]
pub fn server_error<S, E>(sink: &S, err: &E) -> ProxyResponse
where
    S: DiagnosticSink + ?Sized,
    E: fmt::Display + ?Sized,
{
    let message = err.to_string();
    sink.record(&Diagnostic {
        location: Location::caller(),
        message: &message,
    });

    let status = StatusCode::INTERNAL_SERVER_ERROR.as_u16();
    ProxyResponse::new(status, reason_phrase(status))
}

/// Returns an envelope with `status` and its reason phrase as body.
#[must_use]
pub fn client_error(status: u16) -> ProxyResponse {
    ProxyResponse::new(status, reason_phrase(status))
}
